//! Infrastructure layer - Configuration, file storage and telemetry
//!
//! Loads the typed application configuration, stages uploads and sweeps
//! expired artifacts from the storage directories.

pub mod config;
pub mod storage;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, ServerConfig, StorageConfig};
pub use storage::{StagedUpload, StorageError, cleanup_old_files, sanitize_file_name};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};
