use thiserror::Error;

use lotdraw_core::{DrawError, RestoreError, SetupError};
use lotdraw_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    /// The in-memory change stands; only the snapshot write failed.
    #[error("Snapshot storage error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Stored draw state does not match the configuration: {0}")]
    Restore(#[from] RestoreError),

    #[error("Invalid draw layout: {0}")]
    Setup(#[from] SetupError),
}

impl ServiceError {
    /// Expected domain outcomes (full table, blank name) as opposed to faults.
    pub fn is_domain_refusal(&self) -> bool {
        matches!(
            self,
            ServiceError::Draw(
                DrawError::InvalidInput
                    | DrawError::AllSlotsFilled { .. }
                    | DrawError::NoEligibleSlot { .. }
            )
        )
    }
}
