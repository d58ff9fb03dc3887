//! Age-based deletion of produced artifacts

use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use tracing::{debug, error, info, warn};

/// Delete regular files in `folder` whose modification time is at least `max_age` old
///
/// Only the immediate entries of `folder` are considered. Failures are
/// logged and skipped. Returns the number of deleted files.
pub fn cleanup_old_files(folder: &Path, max_age: Duration) -> usize {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "Cannot scan folder for cleanup");
            return 0;
        },
    };

    let now = SystemTime::now();
    let mut removed = 0;

    for entry in entries.flatten() {
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Cannot stat file");
                continue;
            },
        };

        // Modification times in the future count as age zero
        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();

        if age < max_age {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), age_secs = age.as_secs(), "Deleted old file");
                removed += 1;
            },
            Err(e) => error!(path = %path.display(), error = %e, "Error deleting file"),
        }
    }

    debug!(folder = %folder.display(), removed, "Cleanup finished");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_age_empties_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("result.png"), b"data").unwrap();

        let removed = cleanup_old_files(dir.path(), Duration::ZERO);

        assert_eq!(removed, 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn fresh_files_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"a").unwrap();
        std::fs::write(dir.path().join("b.mp3"), b"b").unwrap();

        let removed = cleanup_old_files(dir.path(), Duration::from_secs(3600));

        assert_eq!(removed, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn subdirectories_are_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("inner.png"), b"x").unwrap();
        std::fs::write(dir.path().join("outer.png"), b"x").unwrap();

        let removed = cleanup_old_files(dir.path(), Duration::ZERO);

        assert_eq!(removed, 1);
        assert!(nested.join("inner.png").exists());
        assert!(nested.exists());
    }

    #[test]
    fn missing_folder_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            cleanup_old_files(&dir.path().join("missing"), Duration::ZERO),
            0
        );
    }
}
