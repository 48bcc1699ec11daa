use thiserror::Error;

/// Failures surfaced by a [`Session`](crate::store::Session).
///
/// Constraint violations carry the name of the violated constraint
/// (e.g. `cities_name_key`) so callers can tell them apart from backend faults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Classify a sqlx error, wrapping everything that is not a constraint violation
    pub fn from_sqlx(err: sqlx::Error, context: &'static str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(constraint);
            }
        }
        Self::Backend(anyhow::Error::new(err).context(context))
    }
}
