//! File storage - upload staging and artifact retention

mod janitor;
mod staging;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use janitor::cleanup_old_files;
pub use staging::{StagedUpload, sanitize_file_name};

/// Errors raised by the storage helpers
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
