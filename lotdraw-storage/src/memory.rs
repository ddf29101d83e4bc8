use lotdraw_core::SlotRecord;
use parking_lot::Mutex;

use crate::{SnapshotStore, StorageError};

/// Process-local store. Used when persistence is disabled and by simulations.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Option<Vec<SlotRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot.
    pub fn with_records(records: Vec<SlotRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
        }
    }

    /// Copy of the last saved snapshot.
    pub fn records(&self) -> Option<Vec<SlotRecord>> {
        self.records.lock().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<SlotRecord>>, StorageError> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[SlotRecord]) -> Result<(), StorageError> {
        *self.records.lock() = Some(records.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_snapshot() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&[SlotRecord::empty(1)]).unwrap();
        store.save(&[SlotRecord::empty(1), SlotRecord::empty(2)]).unwrap();
        assert_eq!(store.records().map(|r| r.len()), Some(2));
    }
}
