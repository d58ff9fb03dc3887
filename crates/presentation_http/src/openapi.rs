//! OpenAPI documentation module
//!
//! Serves the OpenAPI document at `/api-docs/openapi.json` and Swagger UI
//! at `/docs`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for TextVox
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TextVox API",
        version = "1.0.0",
        description = "Remove text from images, extract text from images and convert text to speech",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "images", description = "Text removal and text extraction"),
        (name = "speech", description = "Text-to-speech and voice listing")
    ),
    paths(
        handlers::health::health_check,
        handlers::images::remove_text,
        handlers::images::extract_text,
        handlers::speech::speak,
        handlers::speech::list_voices,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::images::RemoveTextForm,
            handlers::images::ExtractTextForm,
            handlers::images::ExtractTextResponse,
            handlers::images::DetailedResultResponse,
            handlers::speech::SpeakForm,
            handlers::speech::VoicesResponse,
            handlers::speech::VoiceResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification
/// - `/docs` - Swagger UI interactive documentation
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_is_valid() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("TextVox API"));
        for path in ["/health", "/remove-text", "/extract-text", "/speak", "/voices"] {
            assert!(json.contains(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_has_all_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert_eq!(tags, vec!["health", "images", "speech"]);
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("ExtractTextResponse"));
    }
}
