use thiserror::Error;

/// Reasons a draw is refused. None of these leave a partial mutation behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Participant name must not be blank")]
    InvalidInput,

    #[error("All {slot_count} slots are already filled")]
    AllSlotsFilled { slot_count: u32 },

    /// Only the reserved slot is still open, and the caller is not the
    /// designated participant.
    #[error("No open slot is available; slot {reserved_slot} is held for the designated participant")]
    NoEligibleSlot { reserved_slot: u32 },

    #[error("Reserved slot {reserved_slot} is already held by '{occupant}'")]
    ReservedSlotConflict { reserved_slot: u32, occupant: String },
}

impl DrawError {
    /// Short label used for metrics and audit records.
    pub fn reason(&self) -> &'static str {
        match self {
            DrawError::InvalidInput => "invalid_input",
            DrawError::AllSlotsFilled { .. } => "all_slots_filled",
            DrawError::NoEligibleSlot { .. } => "no_eligible_slot",
            DrawError::ReservedSlotConflict { .. } => "reserved_slot_conflict",
        }
    }
}

/// Engine construction failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Slot count must be at least 1")]
    NoSlots,

    #[error("Reserved slot {reserved_slot} is outside 1..={slot_count}")]
    ReservedSlotOutOfRange { reserved_slot: u32, slot_count: u32 },

    #[error("Reserved topic {0} is not in the catalog")]
    UnknownReservedTopic(u32),

    #[error("Designated participant name must not be blank")]
    BlankAdminName,

    #[error("Topic catalog is empty")]
    EmptyCatalog,

    #[error("Topic id {0} appears more than once")]
    DuplicateTopicId(u32),

    #[error("Topic text '{0}' appears more than once")]
    DuplicateTopicText(String),

    #[error("Topic {0} has blank text")]
    BlankTopicText(u32),
}

/// Failures rebuilding engine state from persisted slot records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("Snapshot holds {found} slots, configuration expects {expected}")]
    SlotCountMismatch { expected: u32, found: usize },

    #[error("Snapshot sequence number {0} is missing, repeated or out of range")]
    BadSequenceNumber(u32),

    #[error("Snapshot topic '{0}' is not in the catalog")]
    UnknownTopic(String),

    #[error("Participant '{0}' occupies more than one slot")]
    DuplicateOccupant(String),

    #[error("Slot {0} must carry both an occupant and a topic, or neither")]
    HalfFilledSlot(u32),

    #[error(transparent)]
    Setup(#[from] SetupError),
}
