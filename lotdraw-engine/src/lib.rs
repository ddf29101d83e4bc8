//! # lotdraw-engine
//!
//! Runtime layer shared by every front end: owns the allocation engine behind
//! a lock, writes snapshots through a [`lotdraw_storage::SnapshotStore`], and
//! records metrics and audit logs.

pub mod error;
pub mod service;
pub mod setup;
pub mod simulation;

pub use error::ServiceError;
pub use service::{DrawOutcome, DrawService};
pub use setup::{layout, store_for};
pub use simulation::{simulate_cycle, SimulationPlan, SimulationReport};
