//! Application services - Use case implementations

mod image_text_service;
mod speech_service;

pub use image_text_service::{ImageTextService, cleaned_output_path};
pub use speech_service::{SpeakCommand, SpeechArtifact, SpeechService};
