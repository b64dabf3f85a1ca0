use thiserror::Error;

use crate::registry::validation::ValidationError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client input rejected before any persistence side effect.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Backing store could not be read or committed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
