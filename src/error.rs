use thiserror::Error;

use crate::core::CoreError;
use crate::store::StoreError;
use crate::validate::ValidationError;

/// Crate-level convenience error.
///
/// Not a "god error": it is a thin wrapper over canonical capability errors.
/// Nothing here is process-fatal; the worst outcome is one rejected
/// mutation or one failed load with the last good snapshot still usable.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True when the failure rejected a proposed change without touching
    /// committed state (retry with different input may succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
