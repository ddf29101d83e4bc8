//! ## lotdraw-storage::file
//! **JSON snapshot file with atomic replace**
//!
//! Writes go to a temp file in the target directory, are synced, then renamed
//! over the snapshot. A crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use lotdraw_core::SlotRecord;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{SnapshotStore, StorageError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<SlotRecord>>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let records = serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(records))
    }

    fn save(&self, records: &[SlotRecord]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StorageError::io(parent, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), slots = records.len(), "Snapshot written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
