//! Image handlers - text removal and text extraction
//!
//! The uploaded image is staged in the uploads directory for the duration
//! of the request and removed on every exit path.

use axum::{
    Json,
    extract::{Multipart, State},
    response::Response,
};
use domain::{LanguageSet, TextExtraction};
use infrastructure::StagedUpload;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{
    file_response,
    form::{FormFields, UploadedFile},
};
use crate::{error::ApiError, state::AppState};

/// Content type of the cleaned image response
const CLEANED_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Multipart form of `POST /remove-text`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RemoveTextForm {
    /// Image file to process
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Comma-separated list of language codes
    #[schema(example = "en")]
    pub languages: Option<String>,
    /// Radius for the inpainting algorithm
    #[schema(example = 3)]
    pub inpaint_radius: Option<i32>,
}

/// Multipart form of `POST /extract-text`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ExtractTextForm {
    /// Image file to process
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Comma-separated list of language codes
    #[schema(example = "en")]
    pub languages: Option<String>,
}

/// One detected text instance
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailedResultResponse {
    /// Recognized text
    pub text: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Corners as `[x, y]`: top-left, top-right, bottom-right, bottom-left
    pub bounding_box: Vec<[i32; 2]>,
}

/// Text extraction response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractTextResponse {
    /// Recognized strings in detection order
    pub text: Vec<String>,
    /// `text` joined with single spaces
    pub full_text: String,
    /// Text, confidence and geometry per detection
    pub detailed_results: Vec<DetailedResultResponse>,
}

impl From<TextExtraction> for ExtractTextResponse {
    fn from(extraction: TextExtraction) -> Self {
        Self {
            text: extraction.text,
            full_text: extraction.full_text,
            detailed_results: extraction
                .detailed_results
                .into_iter()
                .map(|r| DetailedResultResponse {
                    text: r.text,
                    confidence: r.confidence.value(),
                    bounding_box: r
                        .bounding_box
                        .corners()
                        .iter()
                        .map(|p| [p.x, p.y])
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Image upload plus the language selection shared by both endpoints
struct ImageRequest {
    image: UploadedFile,
    languages: LanguageSet,
    fields: FormFields,
}

impl ImageRequest {
    async fn read(multipart: Multipart, default_languages: &str) -> Result<Self, ApiError> {
        let mut fields = FormFields::from_multipart(multipart).await?;
        let image = fields.take_file("image")?;
        let languages = LanguageSet::parse(fields.text_or("languages", default_languages))?;
        Ok(Self {
            image,
            languages,
            fields,
        })
    }

    async fn stage(&self, state: &AppState) -> Result<StagedUpload, ApiError> {
        Ok(StagedUpload::create(
            &state.config.storage.uploads_dir,
            self.image.file_name.as_deref(),
            &self.image.bytes,
        )
        .await?)
    }
}

/// Remove text from an uploaded image
#[utoipa::path(
    post,
    path = "/remove-text",
    tag = "images",
    request_body(content = RemoveTextForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image with text removed", content_type = "image/jpeg"),
        (status = 422, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 500, description = "Processing failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn remove_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let request = ImageRequest::read(multipart, &state.config.ocr.default_languages).await?;
    let default_radius = i32::try_from(state.config.ocr.default_inpaint_radius).unwrap_or(i32::MAX);
    let radius: i32 = request.fields.parse_or("inpaint_radius", default_radius)?;

    info!(
        file_name = ?request.image.file_name,
        languages = %request.languages,
        radius,
        "Processing image for text removal"
    );

    let output = {
        let upload = request.stage(&state).await?;
        state
            .image_service
            .remove_text(upload.path(), &request.languages, radius.max(0).unsigned_abs())
            .await?
    };

    // Open the result before the sweep can reach it
    let response = file_response(&output, CLEANED_IMAGE_CONTENT_TYPE).await?;
    state
        .sweeper
        .schedule(state.config.storage.results_dir.clone());

    Ok(response)
}

/// Extract text from an uploaded image
#[utoipa::path(
    post,
    path = "/extract-text",
    tag = "images",
    request_body(content = ExtractTextForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted text", body = ExtractTextResponse),
        (status = 422, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 500, description = "Processing failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, ApiError> {
    let request = ImageRequest::read(multipart, &state.config.ocr.default_languages).await?;

    info!(
        file_name = ?request.image.file_name,
        languages = %request.languages,
        "Processing image for text extraction"
    );

    let upload = request.stage(&state).await?;
    let extraction = state
        .image_service
        .extract_text(upload.path(), &request.languages)
        .await?;

    Ok(Json(extraction.into()))
}
