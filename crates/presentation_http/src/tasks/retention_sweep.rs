//! Retention sweep of produced artifacts
//!
//! Results and audio files are deleted once they are older than the
//! retention period. A sweep runs after each file-producing response
//! (detached, never delaying the response) and periodically in the
//! background.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use infrastructure::{StorageConfig, cleanup_old_files};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Owner of the swept directories and the retention policy
#[derive(Debug, Clone)]
pub struct RetentionSweeper {
    dirs: Vec<PathBuf>,
    max_age: Duration,
}

impl RetentionSweeper {
    /// Create a sweeper for `dirs`
    pub fn new(dirs: Vec<PathBuf>, max_age: Duration) -> Self {
        Self { dirs, max_age }
    }

    /// Sweeper for the results and audio directories
    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(
            vec![storage.results_dir.clone(), storage.audio_dir.clone()],
            storage.retention(),
        )
    }

    /// Maximum artifact age
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Swept directories
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Sweep one directory, returning the number of deleted files
    pub async fn sweep_dir(&self, dir: &Path) -> usize {
        let dir = dir.to_path_buf();
        let max_age = self.max_age;
        match tokio::task::spawn_blocking(move || cleanup_old_files(&dir, max_age)).await {
            Ok(removed) => removed,
            Err(e) => {
                error!(error = %e, "Cleanup task failed");
                0
            },
        }
    }

    /// Sweep every owned directory
    pub async fn sweep_all(&self) -> usize {
        let mut removed = 0;
        for dir in &self.dirs {
            removed += self.sweep_dir(dir).await;
        }
        removed
    }

    /// Sweep `dir` in a detached task
    pub fn schedule(self: &Arc<Self>, dir: PathBuf) {
        let sweeper = Arc::clone(self);
        tokio::spawn(async move {
            let removed = sweeper.sweep_dir(&dir).await;
            debug!(dir = %dir.display(), removed, "Request-triggered sweep finished");
        });
    }

    /// Spawn the periodic sweep
    ///
    /// Returns a `JoinHandle` that can be used to abort the task when shutting down.
    pub fn spawn_periodic(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        info!(
            interval_secs = interval.as_secs(),
            retention_secs = self.max_age.as_secs(),
            "Starting retention sweep task"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Don't run immediately on startup
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = self.sweep_all().await;
                if removed > 0 {
                    info!(removed_count = removed, "Swept expired artifacts");
                } else {
                    debug!("No expired artifacts");
                }
            }
        })
    }
}
