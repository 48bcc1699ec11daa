use thiserror::Error;

/// Maximum length of every bounded text column (`VARCHAR(50)`).
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input shapes that must be checked before they reach the store
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject values longer than `max` characters.
pub fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("ensure this value has at most {} characters (got {})", max, len),
        ));
    }
    Ok(())
}

/// Reject values whose length falls outside `min..=max` characters.
pub fn check_len_range(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("ensure this value has at least {} characters (got {})", min, len),
        ));
    }
    check_max_len(field, value, max)
}
