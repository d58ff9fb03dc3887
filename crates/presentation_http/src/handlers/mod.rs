//! HTTP request handlers

pub mod form;
pub mod health;
pub mod images;
pub mod speech;

use std::path::Path;

use axum::{
    body::Body,
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::error::ApiError;

/// Stream a file from disk as an attachment
pub(crate) async fn file_response(path: &Path, content_type: &str) -> Result<Response, ApiError> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        ApiError::Internal(format!("Failed to open {}: {e}", path.display()))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().replace('"', ""))
        .unwrap_or_default();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let content_type = HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
