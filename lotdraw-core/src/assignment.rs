use serde::Serialize;

use crate::catalog::Topic;
use crate::slot::Slot;

/// Whether a draw produced a new assignment or repeated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    Fresh,
    Replay,
}

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub sequence_number: u32,
    pub participant: String,
    pub topic: Topic,
    pub kind: DrawKind,
}

impl Assignment {
    /// Reads the assignment held by `slot`, if it is occupied.
    pub fn from_slot(slot: &Slot, kind: DrawKind) -> Option<Self> {
        match (&slot.occupant, &slot.topic) {
            (Some(participant), Some(topic)) => Some(Self {
                sequence_number: slot.sequence_number,
                participant: participant.clone(),
                topic: topic.clone(),
                kind,
            }),
            _ => None,
        }
    }

    #[inline]
    pub fn is_replay(&self) -> bool {
        self.kind == DrawKind::Replay
    }

    pub fn topic_text(&self) -> &str {
        &self.topic.text
    }
}
