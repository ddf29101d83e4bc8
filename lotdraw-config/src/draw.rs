//! Draw layout configuration.
//!
//! Defines the fixed slot table, the topic catalog and the designated
//! participant override:
//! - Slot count and the reserved sequence number
//! - Topic catalog and the reserved topic id
//! - Optional RNG seed for reproducible draws

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::error::ConfigError;
use crate::validation;

/// Draw layout parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DrawConfig {
    /// Participant who always receives the reserved slot and topic.
    #[serde(default = "default_admin_name")]
    #[validate(length(min = 1, max = 128))]
    #[validate(custom(function = validation::validate_not_blank))]
    pub admin_name: String,

    /// Number of sequence slots (`1..=slot_count`).
    #[serde(default = "default_slot_count")]
    #[validate(range(min = 1, max = 10_000))]
    pub slot_count: u32,

    /// Sequence number kept open for the designated participant.
    #[serde(default = "default_reserved_slot_number")]
    #[validate(range(min = 1))]
    pub reserved_slot_number: u32,

    /// Topic id handed to the designated participant.
    #[serde(default = "default_reserved_topic_id")]
    pub reserved_topic_id: u32,

    /// Fixed RNG seed; draws are reproducible when set.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Topic catalog, in display order.
    #[serde(default = "default_topics")]
    #[validate(length(min = 1))]
    #[validate(custom(function = validation::validate_topics))]
    pub topics: Vec<TopicConfig>,
}

/// A single catalog entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TopicConfig {
    pub id: u32,
    pub text: String,
}

impl DrawConfig {
    /// Cross-field checks the derive cannot express.
    pub fn check_layout(&self) -> Result<(), ConfigError> {
        if self.reserved_slot_number > self.slot_count {
            return Err(ConfigError::Layout(format!(
                "reserved_slot_number {} exceeds slot_count {}",
                self.reserved_slot_number, self.slot_count
            )));
        }
        if !self.topics.iter().any(|t| t.id == self.reserved_topic_id) {
            return Err(ConfigError::Layout(format!(
                "reserved_topic_id {} is not in the topic catalog",
                self.reserved_topic_id
            )));
        }
        Ok(())
    }
}

fn default_admin_name() -> String {
    "Admin".into()
}

fn default_slot_count() -> u32 {
    13
}

fn default_reserved_slot_number() -> u32 {
    10
}

fn default_reserved_topic_id() -> u32 {
    5
}

fn default_topics() -> Vec<TopicConfig> {
    [
        "Outreach to vocational school students on resisting unscheduled addictive substances",
        "Anti-drug talk for the general public at a rural market fair",
        "Talk for parents of teenagers on new psychoactive substance abuse",
        "Drug-law briefing for companies handling precursor chemicals",
        "Drug-law lesson for people under community correction",
        "Anti-drug session for middle school students, free format",
        "Anti-drug session for rural left-behind residents, free format",
    ]
    .into_iter()
    .zip(1..)
    .map(|(text, id)| TopicConfig {
        id,
        text: text.into(),
    })
    .collect()
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            admin_name: default_admin_name(),
            slot_count: default_slot_count(),
            reserved_slot_number: default_reserved_slot_number(),
            reserved_topic_id: default_reserved_topic_id(),
            seed: None,
            topics: default_topics(),
        }
    }
}
