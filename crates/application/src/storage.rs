//! Directory layout for staged uploads and produced artifacts

use std::io;
use std::path::{Path, PathBuf};

/// The three working directories of the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Staged uploads, removed after each request
    pub uploads_dir: PathBuf,
    /// Cleaned images
    pub results_dir: PathBuf,
    /// Synthesized audio
    pub audio_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(
        uploads_dir: impl Into<PathBuf>,
        results_dir: impl Into<PathBuf>,
        audio_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            results_dir: results_dir.into(),
            audio_dir: audio_dir.into(),
        }
    }

    /// Layout with all three directories under `root`
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("uploads"), root.join("results"), root.join("audio"))
    }

    /// Create any missing directories
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for dir in self.all() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Directories whose contents age out
    pub fn output_dirs(&self) -> [&Path; 2] {
        [&self.results_dir, &self.audio_dir]
    }

    /// All managed directories
    pub fn all(&self) -> [&Path; 3] {
        [&self.uploads_dir, &self.results_dir, &self.audio_dir]
    }
}
