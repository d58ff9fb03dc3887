//! Port definitions for text detection
//!
//! Detection is CPU-bound and blocking, so these ports are synchronous.
//! Callers on an async runtime run them inside `spawn_blocking`.

use std::sync::Arc;

use domain::{LanguageSet, TextDetection};
use image::DynamicImage;

use crate::error::VisionError;

/// Port for a constructed text detector
///
/// A detector is bound to the language set it was built for. Handles are
/// shared across requests, so implementations must be `Send + Sync`.
pub trait TextDetector: Send + Sync {
    /// Detect text instances in reading order
    ///
    /// # Errors
    ///
    /// Returns an error if the detector fails to run or its output cannot
    /// be interpreted.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<TextDetection>, VisionError>;

    /// Languages this detector was built for
    fn languages(&self) -> &LanguageSet;
}

/// Port for building detectors
///
/// Construction may be expensive (model loading, language validation);
/// [`crate::DetectorCache`] decides when it happens.
pub trait DetectorFactory: Send + Sync {
    /// Build a detector for the given languages
    ///
    /// # Errors
    ///
    /// Returns an error if the detector backend is missing or does not
    /// support one of the requested languages.
    fn create(&self, languages: &LanguageSet) -> Result<Arc<dyn TextDetector>, VisionError>;

    /// Backend name, used in logs
    fn name(&self) -> &'static str;
}
