//! Staged uploads with scoped cleanup
//!
//! An uploaded file lives on disk only as long as its [`StagedUpload`]
//! guard. Dropping the guard deletes the file, so every exit path of a
//! handler removes the upload.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::StorageError;

/// Name used when the client supplied no usable file name
const FALLBACK_NAME: &str = "upload";

/// An uploaded file written to the staging directory
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    /// Write `bytes` to `dir` as `<uuid>_<sanitised original name>`
    pub async fn create(
        dir: &Path,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, StorageError> {
        let name = format!(
            "{}_{}",
            Uuid::new_v4(),
            sanitize_file_name(original_name.unwrap_or_default())
        );
        let path = dir.join(name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        debug!(path = %path.display(), size = bytes.len(), "Upload staged");
        Ok(Self { path })
    }

    /// Location of the staged file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Staged upload removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged upload"
            ),
        }
    }
}

/// Reduce a client-supplied file name to a single safe path component
///
/// Directory parts (either separator style) and control characters are
/// stripped. Names that end up empty or consist only of dots become
/// `upload`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
