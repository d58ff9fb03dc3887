//! Entities produced by the recognition pipelines

mod text_detection;

pub use text_detection::{DetailedResult, TextDetection, TextExtraction};
