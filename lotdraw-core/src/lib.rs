//! # lotdraw-core
//!
//! Allocation engine for sequenced topic draws.
//!
//! A fixed table of slots (sequence numbers `1..=N`) is filled one participant
//! at a time. Each participant receives a random open slot and a random unused
//! topic from an immutable catalog. One designated participant always receives
//! a reserved slot and topic.
//!
//! ### Key Submodules:
//! - `engine`: draw/reset/state rules and the eligible-pool selection
//! - `catalog`: immutable topic catalog with id and text lookup
//! - `snapshot`: persisted slot records and state restoration

pub mod assignment;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod participant;
pub mod slot;
pub mod snapshot;

pub mod prelude {
    pub use crate::assignment::*;
    pub use crate::catalog::*;
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::slot::*;
    pub use crate::snapshot::*;
}

pub use assignment::{Assignment, DrawKind};
pub use catalog::{Topic, TopicCatalog};
pub use engine::{seeded_rng, Engine, EngineSettings};
pub use error::{DrawError, RestoreError, SetupError};
pub use participant::ParticipantName;
pub use slot::Slot;
pub use snapshot::SlotRecord;
