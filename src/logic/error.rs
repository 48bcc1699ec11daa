use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Outcome of a failed resource operation, one variant per client-visible status
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => {
                Self::Conflict(format!("Duplicate value violates {}", constraint))
            }
            StoreError::ForeignKeyViolation(constraint) => {
                Self::Validation(format!("Referenced record does not exist ({})", constraint))
            }
            StoreError::Backend(e) => Self::Internal(e),
        }
    }
}

/// Replace the generic message of a unique violation with one naming the offending values
pub(crate) fn on_conflict(err: StoreError, message: impl FnOnce() -> String) -> ServiceError {
    match err {
        StoreError::UniqueViolation(_) => ServiceError::Conflict(message()),
        other => other.into(),
    }
}
