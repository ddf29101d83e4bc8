//! Draw service - the shared, persistent face of the allocation engine.
//!
//! The engine sits behind one lock: every draw and reset runs its
//! check → select → write sequence inside the critical section. Snapshot
//! writes happen after the lock is released, serialized by a second lock that
//! remembers the last revision written so an older snapshot never replaces a
//! newer one.
//!
//! A failed snapshot write is reported to the caller but the in-memory change
//! is kept. The next successful write brings storage up to date.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use lotdraw_config::DrawConfig;
use lotdraw_core::{seeded_rng, Assignment, DrawError, Engine, Slot, SlotRecord, TopicCatalog};
use lotdraw_storage::{SnapshotStore, StorageError};
use lotdraw_telemetry::{EventLogger, MetricsRecorder};

use crate::error::ServiceError;
use crate::setup;

/// A successful draw plus the table as it stood right after it.
#[derive(Debug, Clone, Serialize)]
pub struct DrawOutcome {
    pub assignment: Assignment,
    pub slots: Vec<Slot>,
}

struct PendingWrite {
    revision: u64,
    records: Vec<SlotRecord>,
}

pub struct DrawService {
    engine: Mutex<Engine>,
    catalog: TopicCatalog,
    store: Arc<dyn SnapshotStore>,
    /// Revision of the last snapshot successfully written.
    written_revision: Mutex<u64>,
    metrics: Arc<MetricsRecorder>,
}

impl DrawService {
    /// Opens the service, restoring state from `store` when a snapshot exists.
    ///
    /// An unreadable snapshot starts an empty cycle (the file is replaced at
    /// the next write). A readable snapshot that contradicts the configuration
    /// is an error.
    #[instrument(skip_all, fields(store = %store.describe()))]
    pub fn open(
        config: &DrawConfig,
        store: Arc<dyn SnapshotStore>,
        metrics: Arc<MetricsRecorder>,
    ) -> Result<Self, ServiceError> {
        let (settings, catalog) = setup::layout(config)?;
        let rng = seeded_rng(config.seed);

        let engine = match store.load() {
            Ok(Some(records)) => {
                let engine = Engine::restore(settings, catalog, rng, records)?;
                info!(
                    occupied = engine.slots().len() - engine.remaining_slots(),
                    drawn_topics = engine.drawn_topics().len(),
                    "Restored draw state"
                );
                engine
            }
            Ok(None) => {
                info!("No snapshot found, starting an empty cycle");
                Engine::new(settings, catalog, rng)?
            }
            Err(StorageError::Corrupt { path, source }) => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "Snapshot unreadable, starting an empty cycle"
                );
                Engine::new(settings, catalog, rng)?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_engine(engine, store, metrics))
    }

    /// Opens the service ignoring any stored snapshot.
    pub fn open_fresh(
        config: &DrawConfig,
        store: Arc<dyn SnapshotStore>,
        metrics: Arc<MetricsRecorder>,
    ) -> Result<Self, ServiceError> {
        let (settings, catalog) = setup::layout(config)?;
        let engine = Engine::new(settings, catalog, seeded_rng(config.seed))?;
        Ok(Self::with_engine(engine, store, metrics))
    }

    pub fn with_engine(
        engine: Engine,
        store: Arc<dyn SnapshotStore>,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            catalog: engine.catalog().clone(),
            written_revision: Mutex::new(engine.revision()),
            engine: Mutex::new(engine),
            store,
            metrics,
        }
    }

    #[instrument(skip_all, fields(participant = %name.trim()))]
    pub fn draw(&self, name: &str) -> Result<DrawOutcome, ServiceError> {
        let started = Instant::now();

        let (result, pending, slots) = {
            let mut engine = self.engine.lock();
            let result = engine.draw(name);
            let pending = match &result {
                Ok(assignment) if !assignment.is_replay() => Some(PendingWrite {
                    revision: engine.revision(),
                    records: engine.records(),
                }),
                _ => None,
            };
            let slots = result.is_ok().then(|| engine.current_state());
            (result, pending, slots)
        };

        self.metrics
            .draw_latency
            .observe(started.elapsed().as_nanos() as f64);

        let assignment = match result {
            Ok(assignment) => assignment,
            Err(e) => {
                self.metrics.inc_rejection(e.reason());
                match &e {
                    DrawError::ReservedSlotConflict { .. } => {
                        error!(error = %e, "Draw refused: configuration conflict")
                    }
                    _ => info!(reason = e.reason(), "Draw refused"),
                }
                return Err(e.into());
            }
        };

        if assignment.is_replay() {
            self.metrics.replays.inc();
            info!(
                sequence_number = assignment.sequence_number,
                "Repeat draw answered from existing slot"
            );
        } else {
            self.metrics.draws.inc();
            EventLogger::log_event(
                "draw",
                &[
                    ("participant", assignment.participant.clone()),
                    ("sequence_number", assignment.sequence_number.to_string()),
                    ("topic_id", assignment.topic.id.to_string()),
                ],
            );
        }

        if let Some(pending) = pending {
            self.persist(pending)?;
        }

        Ok(DrawOutcome {
            assignment,
            slots: slots.unwrap_or_default(),
        })
    }

    /// Starts a new cycle: every slot empty, every topic available.
    #[instrument(skip_all)]
    pub fn reset(&self) -> Result<Vec<Slot>, ServiceError> {
        let (pending, slots) = {
            let mut engine = self.engine.lock();
            engine.reset();
            let pending = PendingWrite {
                revision: engine.revision(),
                records: engine.records(),
            };
            (pending, engine.current_state())
        };

        self.metrics.resets.inc();
        EventLogger::log_event("reset", &[("slots", slots.len().to_string())]);

        self.persist(pending)?;
        Ok(slots)
    }

    /// Slots in sequence order.
    pub fn current_state(&self) -> Vec<Slot> {
        self.engine.lock().current_state()
    }

    pub fn drawn_topics(&self) -> BTreeSet<u32> {
        self.engine.lock().drawn_topics().clone()
    }

    pub fn topics(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    fn persist(&self, pending: PendingWrite) -> Result<(), ServiceError> {
        let mut written = self.written_revision.lock();
        if pending.revision <= *written {
            debug!(
                revision = pending.revision,
                written = *written,
                "Skipping stale snapshot"
            );
            return Ok(());
        }

        match self.store.save(&pending.records) {
            Ok(()) => {
                *written = pending.revision;
                Ok(())
            }
            Err(e) => {
                self.metrics.persistence_failures.inc();
                error!(
                    error = %e,
                    revision = pending.revision,
                    "Snapshot write failed, in-memory state kept"
                );
                Err(e.into())
            }
        }
    }
}
