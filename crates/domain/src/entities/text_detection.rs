//! Text detection results
//!
//! A detector yields an ordered list of [`TextDetection`]s; the extraction
//! response is derived from that list without reordering.

use serde::{Deserialize, Serialize};

use crate::value_objects::{BoundingBox, Confidence};

/// One detected text instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDetection {
    /// Region geometry in pixel coordinates
    pub bounding_box: BoundingBox,
    /// Recognized text
    pub text: String,
    /// Recognition confidence
    pub confidence: Confidence,
}

impl TextDetection {
    #[must_use]
    pub fn new(bounding_box: BoundingBox, text: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            bounding_box,
            text: text.into(),
            confidence,
        }
    }
}

/// Per-instance entry of an extraction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResult {
    pub text: String,
    pub confidence: Confidence,
    pub bounding_box: BoundingBox,
}

/// Response body of a text extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextExtraction {
    /// Recognized strings in detection order
    pub text: Vec<String>,
    /// `text` joined with single spaces
    pub full_text: String,
    /// Text, confidence and geometry per detection
    pub detailed_results: Vec<DetailedResult>,
}

impl TextExtraction {
    /// Build the extraction response from detections, preserving order
    #[must_use]
    pub fn from_detections(detections: Vec<TextDetection>) -> Self {
        let text: Vec<String> = detections.iter().map(|d| d.text.clone()).collect();
        let full_text = text.join(" ");
        let detailed_results = detections
            .into_iter()
            .map(|d| DetailedResult {
                text: d.text,
                confidence: d.confidence,
                bounding_box: d.bounding_box,
            })
            .collect();

        Self {
            text,
            full_text,
            detailed_results,
        }
    }

    /// Check whether nothing was detected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
