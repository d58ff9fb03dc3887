//! Speech service - text-to-speech dispatch and voice listing
//!
//! Routes a speak request to the networked or the offline engine based on
//! the engine selector and writes the audio under a fresh random name.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use ai_speech::{AudioFormat, SpeechEngine, SynthesisRequest, TextToSpeech, VoiceInfo};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApplicationError;

/// Volume used for offline synthesis
const OFFLINE_VOLUME: f32 = 1.0;

/// A request to speak some text
#[derive(Debug, Clone)]
pub struct SpeakCommand {
    /// Text to synthesize
    pub text: String,
    /// Engine selector ("gtts" or "pyttsx3")
    pub engine: String,
    /// Language code for gtts, voice identifier for pyttsx3
    pub language: String,
    /// Words per minute (pyttsx3 only)
    pub rate: u32,
    /// Slow speech (gtts only)
    pub slow: bool,
}

impl SpeakCommand {
    /// Command with the default engine, language and prosody
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            engine: SpeechEngine::default().as_str().to_string(),
            language: "en".to_string(),
            rate: 200,
            slow: false,
        }
    }
}

/// Audio file produced by a synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechArtifact {
    /// Location of the audio file
    pub path: PathBuf,
    /// Container format of the file
    pub format: AudioFormat,
}

impl SpeechArtifact {
    /// File name of the artifact
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Service for speech synthesis
pub struct SpeechService {
    networked: Arc<dyn TextToSpeech>,
    offline: Arc<dyn TextToSpeech>,
    audio_dir: PathBuf,
}

impl fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechService")
            .field("networked", &self.networked.provider_name())
            .field("offline", &self.offline.provider_name())
            .field("audio_dir", &self.audio_dir)
            .finish()
    }
}

impl SpeechService {
    /// Create a new speech service
    pub fn new(
        networked: Arc<dyn TextToSpeech>,
        offline: Arc<dyn TextToSpeech>,
        audio_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            networked,
            offline,
            audio_dir: audio_dir.into(),
        }
    }

    /// Directory the audio artifacts are written to
    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Synthesize the command's text and write it to the audio directory
    #[instrument(skip(self, command), fields(
        engine = %command.engine,
        language = %command.language,
        text_len = command.text.len()
    ))]
    pub async fn synthesize(
        &self,
        command: &SpeakCommand,
    ) -> Result<SpeechArtifact, ApplicationError> {
        let engine: SpeechEngine = command
            .engine
            .parse()
            .map_err(|_| ApplicationError::UnsupportedEngine(command.engine.clone()))?;

        let (backend, request) = match engine {
            SpeechEngine::Gtts => (
                &self.networked,
                SynthesisRequest::new(command.text.as_str())
                    .with_language(command.language.as_str())
                    .with_slow(command.slow),
            ),
            SpeechEngine::Pyttsx3 => (
                &self.offline,
                SynthesisRequest::new(command.text.as_str())
                    .with_voice(command.language.as_str())
                    .with_rate(command.rate)
                    .with_volume(OFFLINE_VOLUME),
            ),
        };

        let audio = backend.synthesize(&request).await.map_err(|e| {
            ApplicationError::Synthesis(format!(
                "Failed to convert text to speech with {}: {e}",
                engine_label(engine)
            ))
        })?;

        let path = self
            .audio_dir
            .join(format!("{}.{}", Uuid::new_v4(), audio.format().extension()));
        tokio::fs::write(&path, audio.data()).await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to write {}: {e}", path.display()))
        })?;

        info!(
            provider = backend.provider_name(),
            bytes = audio.size_bytes(),
            path = %path.display(),
            "Speech synthesized"
        );

        Ok(SpeechArtifact {
            path,
            format: audio.format(),
        })
    }

    /// Voices installed for the offline engine
    #[instrument(skip(self))]
    pub async fn list_voices(&self) -> Result<Vec<VoiceInfo>, ApplicationError> {
        self.offline
            .list_voices()
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Failed to list voices: {e}")))
    }
}

/// Engine name as shown in error messages
const fn engine_label(engine: SpeechEngine) -> &'static str {
    match engine {
        SpeechEngine::Gtts => "gTTS",
        SpeechEngine::Pyttsx3 => "pyttsx3",
    }
}
