//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `storage`: working directories and retention
//!
//! The OCR and speech sections reuse the configuration types of the
//! `ai_vision` and `ai_speech` crates.

mod server;
mod storage;

use std::path::Path;

use ai_speech::SpeechConfig;
use ai_vision::OcrConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Environment variable prefix, e.g. `TEXTVOX__SERVER__PORT`
const ENV_PREFIX: &str = "TEXTVOX";

/// Separator between nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Text detection configuration
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from `config.*` in the working directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables (e.g. `TEXTVOX__SERVER__PORT=8080`) override
    /// the file, which overrides the built-in defaults.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::from(file).required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(file = %file.display(), "Configuration loaded");
        Ok(config)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.storage.retention_secs == 0 {
            return Err(ConfigError::Invalid(
                "storage.retention_secs must be non-zero".into(),
            ));
        }

        let dirs = [
            ("storage.uploads_dir", &self.storage.uploads_dir),
            ("storage.results_dir", &self.storage.results_dir),
            ("storage.audio_dir", &self.storage.audio_dir),
        ];
        if let Some((name, _)) = dirs.iter().find(|(_, dir)| dir.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid(format!("{name} must not be empty")));
        }

        self.ocr
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("ocr: {e}")))?;
        self.speech
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("speech: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.server.shutdown_timeout_secs, 30);
        assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.storage.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.storage.results_dir, PathBuf::from("results"));
        assert_eq!(config.storage.audio_dir, PathBuf::from("audio"));
        assert_eq!(config.storage.retention_secs, 3600);
        assert_eq!(config.ocr.max_cached_detectors, 1);
        assert_eq!(config.speech.espeak.default_rate, 200);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.sweep_interval_secs, 900);
    }

    #[test]
    fn deserialize_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080
            log_format = "json"

            [storage]
            results_dir = "/var/lib/textvox/results"
            retention_secs = 60

            [ocr]
            default_languages = "en,de"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.json_logs());
        assert_eq!(
            config.storage.results_dir,
            PathBuf::from("/var/lib/textvox/results")
        );
        assert_eq!(config.storage.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.storage.retention_secs, 60);
        assert_eq!(config.ocr.default_languages, "en,de");
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent")).unwrap();
        assert_eq!(config.storage.retention_secs, 3600);
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textvox.toml");
        std::fs::write(
            &path,
            "[storage]\naudio_dir = \"speech\"\nsweep_interval_secs = 0\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.storage.audio_dir, PathBuf::from("speech"));
        assert!(config.storage.sweep_interval().is_none());
    }

    #[test]
    fn load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textvox.toml");
        std::fs::write(&path, "[storage]\nretention_secs = 0\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_empty_directory() {
        let mut config = AppConfig::default();
        config.storage.audio_dir = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("storage.audio_dir"));
    }

    #[test]
    fn validate_delegates_to_sections() {
        let mut config = AppConfig::default();
        config.speech.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("speech:"));
    }

    #[test]
    fn storage_layout_uses_configured_dirs() {
        let mut config = AppConfig::default();
        config.storage.results_dir = PathBuf::from("out");
        let layout = config.storage.layout();
        assert_eq!(layout.results_dir, PathBuf::from("out"));
        assert_eq!(layout.uploads_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
    }
}
