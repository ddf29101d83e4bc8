//! ## lotdraw-core::engine
//! **Allocation engine**
//!
//! Maps participants to a sequence slot and a topic. Every operation is
//! all-or-nothing: eligibility is computed from scratch on each call (filter,
//! then uniform pick) and state is written at a single point at the end.
//!
//! The engine is a plain owned value with `&mut self` mutators. Callers that
//! share it across threads wrap it in a single lock.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error};

use crate::assignment::{Assignment, DrawKind};
use crate::catalog::{Topic, TopicCatalog};
use crate::error::{DrawError, SetupError};
use crate::participant::ParticipantName;
use crate::slot::{empty_table, Slot};

/// Fixed draw layout, decided at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub slot_count: u32,
    /// Name that always receives `reserved_slot` and `reserved_topic`.
    pub admin_name: String,
    pub reserved_slot: u32,
    pub reserved_topic: u32,
}

impl EngineSettings {
    /// Checks the settings against the catalog they will be used with.
    pub fn check(&self, catalog: &TopicCatalog) -> Result<(), SetupError> {
        if self.slot_count == 0 {
            return Err(SetupError::NoSlots);
        }
        if self.reserved_slot == 0 || self.reserved_slot > self.slot_count {
            return Err(SetupError::ReservedSlotOutOfRange {
                reserved_slot: self.reserved_slot,
                slot_count: self.slot_count,
            });
        }
        if catalog.get(self.reserved_topic).is_none() {
            return Err(SetupError::UnknownReservedTopic(self.reserved_topic));
        }
        if self.admin_name.trim().is_empty() {
            return Err(SetupError::BlankAdminName);
        }
        Ok(())
    }
}

/// Builds the engine's random source. A seed makes draws reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub struct Engine {
    pub(crate) settings: EngineSettings,
    pub(crate) catalog: TopicCatalog,
    reserved_topic: Topic,
    pub(crate) slots: Vec<Slot>,
    pub(crate) drawn: BTreeSet<u32>,
    revision: u64,
    rng: StdRng,
}

impl Engine {
    pub fn new(
        mut settings: EngineSettings,
        catalog: TopicCatalog,
        rng: StdRng,
    ) -> Result<Self, SetupError> {
        settings.check(&catalog)?;
        settings.admin_name = settings.admin_name.trim().to_owned();

        let reserved_topic = catalog
            .get(settings.reserved_topic)
            .cloned()
            .ok_or(SetupError::UnknownReservedTopic(settings.reserved_topic))?;

        Ok(Self {
            slots: empty_table(settings.slot_count),
            settings,
            catalog,
            reserved_topic,
            drawn: BTreeSet::new(),
            revision: 0,
            rng,
        })
    }

    /// Draws a slot and a topic for `name`.
    ///
    /// A repeat draw for a name that already holds a slot returns that slot's
    /// assignment as [`DrawKind::Replay`] and changes nothing.
    pub fn draw(&mut self, name: &str) -> Result<Assignment, DrawError> {
        let name = ParticipantName::parse(name)?;

        if let Some(existing) = self
            .slots
            .iter()
            .filter(|slot| slot.is_held_by(name.as_str()))
            .find_map(|slot| Assignment::from_slot(slot, DrawKind::Replay))
        {
            return Ok(existing);
        }

        if self.slots.iter().all(Slot::is_occupied) {
            return Err(DrawError::AllSlotsFilled {
                slot_count: self.settings.slot_count,
            });
        }

        let (index, topic) = if name.as_str() == self.settings.admin_name {
            let index = self.designated_slot()?;
            let topic = self.reserved_topic.clone();
            self.drawn.insert(topic.id);
            (index, topic)
        } else {
            let index = self.pick_slot()?;
            (index, self.pick_topic())
        };

        let slot = &mut self.slots[index];
        let assignment = Assignment {
            sequence_number: slot.sequence_number,
            participant: name.as_str().to_owned(),
            topic: topic.clone(),
            kind: DrawKind::Fresh,
        };
        slot.fill(name.into_inner(), topic);
        self.revision += 1;

        debug!(
            sequence_number = assignment.sequence_number,
            topic_id = assignment.topic.id,
            revision = self.revision,
            "Slot filled"
        );
        Ok(assignment)
    }

    /// Empties every slot and forgets which topics were drawn.
    pub fn reset(&mut self) {
        self.slots = empty_table(self.settings.slot_count);
        self.drawn.clear();
        self.revision += 1;
    }

    /// Copy of all slots in ascending sequence order.
    pub fn current_state(&self) -> Vec<Slot> {
        self.slots.clone()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Ids consumed from the catalog in this cycle.
    pub fn drawn_topics(&self) -> &BTreeSet<u32> {
        &self.drawn
    }

    pub fn remaining_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_occupied()).count()
    }

    /// Bumped on every mutation; lets writers order snapshots.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    fn designated_slot(&self) -> Result<usize, DrawError> {
        let reserved_slot = self.settings.reserved_slot;
        let index = (reserved_slot - 1) as usize;

        if let Some(occupant) = &self.slots[index].occupant {
            error!(
                reserved_slot,
                occupant = %occupant,
                "Reserved slot taken by another participant"
            );
            return Err(DrawError::ReservedSlotConflict {
                reserved_slot,
                occupant: occupant.clone(),
            });
        }
        Ok(index)
    }

    fn pick_slot(&mut self) -> Result<usize, DrawError> {
        let reserved_slot = self.settings.reserved_slot;
        let eligible: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_occupied() && slot.sequence_number != reserved_slot)
            .map(|(index, _)| index)
            .collect();

        if eligible.is_empty() {
            return Err(DrawError::NoEligibleSlot { reserved_slot });
        }
        Ok(eligible[self.rng.random_range(0..eligible.len())])
    }

    /// Unused topics first. Once every id is drawn, any topic may repeat and
    /// nothing is tracked.
    fn pick_topic(&mut self) -> Topic {
        let fresh: Vec<&Topic> = self
            .catalog
            .iter()
            .filter(|t| !self.drawn.contains(&t.id))
            .collect();

        if !fresh.is_empty() {
            let topic = fresh[self.rng.random_range(0..fresh.len())].clone();
            self.drawn.insert(topic.id);
            return topic;
        }

        debug!("Topic pool exhausted, drawing from the full catalog");
        let all = self.catalog.as_slice();
        all[self.rng.random_range(0..all.len())].clone()
    }
}
