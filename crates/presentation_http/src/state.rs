//! Application state shared across handlers

use std::sync::Arc;

use application::{ImageTextService, SpeechService};
use infrastructure::AppConfig;

use crate::tasks::RetentionSweeper;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Text removal and extraction pipelines
    pub image_service: Arc<ImageTextService>,
    /// Speech synthesis and voice listing
    pub speech_service: Arc<SpeechService>,
    /// Age-based cleanup of produced artifacts
    pub sweeper: Arc<RetentionSweeper>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("image_service", &self.image_service)
            .field("speech_service", &self.speech_service)
            .field("sweeper", &self.sweeper)
            .finish_non_exhaustive()
    }
}
