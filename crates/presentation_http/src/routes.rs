//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{handlers, middleware, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // Image pipelines
        .route("/remove-text", post(handlers::images::remove_text))
        .route("/extract-text", post(handlers::images::extract_text))
        // Speech
        .route("/speak", post(handlers::speech::speak))
        .route("/voices", get(handlers::speech::list_voices))
        // API documentation
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}

/// Wrap the router in the server middleware stack
///
/// Order matters: the last layer added is the outermost.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.allowed_origins))
        .layer(axum::middleware::from_fn(middleware::request_id))
}

/// CORS policy: allow all when no origins are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
