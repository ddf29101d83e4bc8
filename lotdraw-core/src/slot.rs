use serde::{Deserialize, Serialize};

use crate::catalog::Topic;

/// One fixed sequence position. Occupant and topic are written together, once
/// per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub sequence_number: u32,
    pub occupant: Option<String>,
    pub topic: Option<Topic>,
}

impl Slot {
    pub fn empty(sequence_number: u32) -> Self {
        Self {
            sequence_number,
            occupant: None,
            topic: None,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    #[inline]
    pub fn is_held_by(&self, name: &str) -> bool {
        self.occupant.as_deref() == Some(name)
    }

    pub(crate) fn fill(&mut self, occupant: String, topic: Topic) {
        self.occupant = Some(occupant);
        self.topic = Some(topic);
    }
}

/// Builds the empty table `1..=slot_count`.
pub(crate) fn empty_table(slot_count: u32) -> Vec<Slot> {
    (1..=slot_count).map(Slot::empty).collect()
}
