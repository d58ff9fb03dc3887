//! Vision processing errors

use thiserror::Error;

/// Errors that can occur during detection or inpainting
#[derive(Debug, Error)]
pub enum VisionError {
    /// Detector executable or model missing
    #[error("Detector not available: {0}")]
    NotAvailable(String),

    /// Requested languages are not installed for the detector
    #[error("Unsupported language(s): {requested} (available: {available})")]
    UnsupportedLanguage {
        /// Languages that could not be resolved
        requested: String,
        /// Languages the detector reports as installed
        available: String,
    },

    /// Detection run failed
    #[error("Detection failed: {0}")]
    DetectionFailed(String),

    /// Detector output could not be parsed
    #[error("Invalid detector output: {0}")]
    InvalidOutput(String),

    /// Caller passed inconsistent inputs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// OpenCV could not fill the masked regions
    #[error("Inpainting failed: {0}")]
    Inpainting(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}
