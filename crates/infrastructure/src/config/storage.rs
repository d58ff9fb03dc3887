//! Storage directories and retention policy.

use std::{path::PathBuf, time::Duration};

use application::StorageLayout;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Staging directory for uploads
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Directory for cleaned images
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Directory for synthesized audio
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// Age in seconds after which artifacts are deleted
    #[serde(default = "default_retention")]
    pub retention_secs: u64,

    /// Interval of the periodic sweep in seconds (0 disables it)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio")
}

const fn default_retention() -> u64 {
    3600
}

const fn default_sweep_interval() -> u64 {
    900
}

impl StorageConfig {
    /// Directory layout for the pipelines
    #[must_use]
    pub fn layout(&self) -> StorageLayout {
        StorageLayout::new(&self.uploads_dir, &self.results_dir, &self.audio_dir)
    }

    /// Maximum artifact age
    #[must_use]
    pub const fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    /// Periodic sweep interval, `None` when disabled
    #[must_use]
    pub const fn sweep_interval(&self) -> Option<Duration> {
        if self.sweep_interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.sweep_interval_secs))
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            results_dir: default_results_dir(),
            audio_dir: default_audio_dir(),
            retention_secs: default_retention(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}
