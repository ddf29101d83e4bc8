//! # lotdraw-storage
//!
//! Snapshot persistence for the slot table.
//!
//! A snapshot is the JSON array of slot records produced by
//! [`lotdraw_core::Engine::records`]. Stores only move bytes; restoring state
//! from the records is the engine's job.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use lotdraw_core::SlotRecord;

/// Backing store for slot snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Returns the last saved records, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<SlotRecord>>, StorageError>;

    /// Replaces the stored snapshot.
    fn save(&self, records: &[SlotRecord]) -> Result<(), StorageError>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}
