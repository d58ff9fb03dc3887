//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Language list was empty or contained only separators
    #[error("Invalid language list: {0}")]
    InvalidLanguageSet(String),

    /// A language code contained characters outside `[a-z0-9_-]`
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
