//! Typed error enum for the service layer.

use geostuff_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, geometry, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Referenced city does not exist.
    #[error("city {0} not found")]
    CityNotFound(i32),

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound(_) | Self::Storage(StorageError::NotFound { .. }))
    }
}
