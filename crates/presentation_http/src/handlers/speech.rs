//! Speech handlers - text-to-speech and voice listing

use ai_speech::{VoiceGender, VoiceInfo};
use application::SpeakCommand;
use axum::{Json, extract::State, response::Response};
use infrastructure::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::{
    file_response,
    form::{AnyForm, FormFields},
};
use crate::{error::ApiError, state::AppState};

/// Content type of every `/speak` response, whatever container the engine produced
const SPOKEN_AUDIO_CONTENT_TYPE: &str = "audio/mp3";

/// Form of `POST /speak`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SpeakForm {
    /// Text to convert to speech
    pub text: String,
    /// TTS engine to use ("gtts" or "pyttsx3")
    #[schema(example = "gtts")]
    pub engine: Option<String>,
    /// Language code for gtts, voice identifier for pyttsx3
    #[schema(example = "en")]
    pub language: Option<String>,
    /// Speech rate in words per minute (pyttsx3 only)
    #[schema(example = 200)]
    pub rate: Option<u32>,
    /// Speak slowly (gtts only)
    #[schema(example = false)]
    pub slow: Option<bool>,
}

/// One installed voice
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoiceResponse {
    /// Voice identifier accepted as `language` by the pyttsx3 engine
    pub id: String,
    /// Display name
    pub name: String,
    /// Language tags
    pub languages: Vec<String>,
    /// "male", "female" or null
    pub gender: Option<String>,
}

impl From<VoiceInfo> for VoiceResponse {
    fn from(voice: VoiceInfo) -> Self {
        Self {
            id: voice.id,
            name: voice.name,
            languages: voice.languages,
            gender: voice.gender.map(|g| {
                match g {
                    VoiceGender::Male => "male",
                    VoiceGender::Female => "female",
                    VoiceGender::Neutral => "neutral",
                }
                .to_string()
            }),
        }
    }
}

/// Voice listing response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoicesResponse {
    /// Installed voices of the offline engine
    pub voices: Vec<VoiceResponse>,
}

/// Build the speak command from the submitted fields
fn speak_command(form: &FormFields, config: &AppConfig) -> Result<SpeakCommand, ApiError> {
    Ok(SpeakCommand {
        text: form.require_text("text")?.to_string(),
        engine: form.text_or("engine", "gtts").to_string(),
        language: form
            .text_or("language", &config.speech.google.default_language)
            .to_string(),
        rate: form.parse_or("rate", config.speech.espeak.default_rate)?,
        slow: form.flag_or("slow", false)?,
    })
}

/// Convert text to speech
#[utoipa::path(
    post,
    path = "/speak",
    tag = "speech",
    request_body(content = SpeakForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Synthesized audio", content_type = "audio/mp3"),
        (status = 400, description = "Unsupported engine", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid form data", body = crate::error::ErrorResponse),
        (status = 500, description = "Synthesis failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, form))]
pub async fn speak(
    State(state): State<AppState>,
    AnyForm(form): AnyForm,
) -> Result<Response, ApiError> {
    let command = speak_command(&form, &state.config)?;
    info!(engine = %command.engine, "Converting text to speech");

    let artifact = state.speech_service.synthesize(&command).await?;

    let response = file_response(&artifact.path, SPOKEN_AUDIO_CONTENT_TYPE).await?;
    state
        .sweeper
        .schedule(state.config.storage.audio_dir.clone());

    Ok(response)
}

/// List voices of the offline engine
#[utoipa::path(
    get,
    path = "/voices",
    tag = "speech",
    responses(
        (status = 200, description = "Installed voices", body = VoicesResponse),
        (status = 500, description = "Listing failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_voices(State(state): State<AppState>) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state.speech_service.list_voices().await?;
    Ok(Json(VoicesResponse {
        voices: voices.into_iter().map(VoiceResponse::from).collect(),
    }))
}
