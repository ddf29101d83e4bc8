//! Snapshot persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Where and whether the slot table is persisted.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct StorageConfig {
    /// When disabled, state lives only as long as the process.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JSON snapshot file, rewritten after every draw and reset.
    #[serde(default = "default_snapshot_path")]
    #[validate(custom(function = validation::validate_snapshot_path))]
    pub snapshot_path: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/draw-state.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            snapshot_path: default_snapshot_path(),
        }
    }
}
