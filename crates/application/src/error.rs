//! Application-level errors

use ai_vision::VisionError;
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input image could not be read or decoded
    #[error("{0}")]
    Load(String),

    /// Text detection failed
    #[error("Text detection failed: {0}")]
    Detection(String),

    /// Speech backend failed
    #[error("{0}")]
    Synthesis(String),

    /// Unknown speech engine selector
    #[error("Unsupported TTS engine: {0}")]
    UnsupportedEngine(String),

    /// Reading or writing an artifact failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Request parameters are invalid
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the caller is at fault
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEngine(_) | Self::Validation(_) | Self::Domain(_)
        )
    }
}

impl From<VisionError> for ApplicationError {
    fn from(err: VisionError) -> Self {
        match err {
            VisionError::NotAvailable(_)
            | VisionError::UnsupportedLanguage { .. }
            | VisionError::DetectionFailed(_)
            | VisionError::InvalidOutput(_) => Self::Detection(err.to_string()),
            VisionError::InvalidInput(_)
            | VisionError::Inpainting(_)
            | VisionError::Configuration(_) => {
                Self::Internal(err.to_string())
            },
        }
    }
}
