//! Persisted slot layout and state restoration.
//!
//! A snapshot is the ordered list of slot records. Topics are stored by text;
//! the drawn-topic set is not stored and is re-derived on restore by looking
//! each text up in the catalog.

use std::collections::HashSet;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::catalog::TopicCatalog;
use crate::engine::{Engine, EngineSettings};
use crate::error::RestoreError;
use crate::participant::ParticipantName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub sequence_number: u32,
    pub occupant: Option<String>,
    pub topic_text: Option<String>,
}

impl SlotRecord {
    pub fn empty(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            occupant: None,
            topic_text: None,
        }
    }
}

impl Engine {
    /// Current state in persisted form, ordered by sequence number.
    pub fn records(&self) -> Vec<SlotRecord> {
        self.slots
            .iter()
            .map(|slot| SlotRecord {
                sequence_number: slot.sequence_number,
                occupant: slot.occupant.clone(),
                topic_text: slot.topic.as_ref().map(|t| t.text.clone()),
            })
            .collect()
    }

    /// Rebuilds an engine from persisted records.
    ///
    /// Records may arrive in any order but must cover `1..=slot_count` exactly
    /// once.
    pub fn restore(
        settings: EngineSettings,
        catalog: TopicCatalog,
        rng: StdRng,
        records: Vec<SlotRecord>,
    ) -> Result<Self, RestoreError> {
        let mut engine = Engine::new(settings, catalog.clone(), rng)?;
        let slot_count = engine.settings.slot_count;

        if records.len() != slot_count as usize {
            return Err(RestoreError::SlotCountMismatch {
                expected: slot_count,
                found: records.len(),
            });
        }

        let mut seen_slots = HashSet::with_capacity(records.len());
        let mut seen_names = HashSet::new();

        for record in records {
            let seq = record.sequence_number;
            if seq == 0 || seq > slot_count || !seen_slots.insert(seq) {
                return Err(RestoreError::BadSequenceNumber(seq));
            }

            match (record.occupant, record.topic_text) {
                (None, None) => {}
                (Some(occupant), Some(text)) => {
                    let name = ParticipantName::parse(&occupant)
                        .map_err(|_| RestoreError::HalfFilledSlot(seq))?;
                    let topic = catalog
                        .find_by_text(&text)
                        .cloned()
                        .ok_or(RestoreError::UnknownTopic(text))?;
                    if !seen_names.insert(name.clone()) {
                        return Err(RestoreError::DuplicateOccupant(name.into_inner()));
                    }

                    engine.drawn.insert(topic.id);
                    engine.slots[(seq - 1) as usize].fill(name.into_inner(), topic);
                }
                _ => return Err(RestoreError::HalfFilledSlot(seq)),
            }
        }

        Ok(engine)
    }
}
