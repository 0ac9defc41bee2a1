use thiserror::Error;

/// Rejection reasons for documents and requests that must not leave the client
/// (or must not be forwarded by the proxy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Slug '{0}' must contain only lowercase letters, digits and single hyphens")]
    InvalidSlug(String),

    #[error("Section id '{0}' is used more than once")]
    DuplicateSectionId(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Fails with `MissingField` when `value` is empty after trimming.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
