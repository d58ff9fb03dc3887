//! Health check handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Services offered by this server
pub const SERVICES: [&str; 3] = ["text_removal", "text_extraction", "text_to_speech"];

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the server is running
    pub status: String,
    /// Offered services
    pub services: Vec<String>,
    /// Server version
    pub version: String,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        services: SERVICES.iter().map(ToString::to_string).collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
