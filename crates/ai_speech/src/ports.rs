//! Port definitions for speech processing
//!
//! Defines the trait (port) that speech synthesis adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, SynthesisRequest, VoiceInfo};

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to audio speech.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{SynthesisRequest, TextToSpeech};
///
/// async fn speak(tts: &impl TextToSpeech, text: &str) -> Result<Vec<u8>, SpeechError> {
///     let audio = tts.synthesize(&SynthesisRequest::new(text)).await?;
///     Ok(audio.into_data())
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// Engines read the request fields that apply to them and ignore the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError>;

    /// List available voices
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if listing fails.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    /// Check if the TTS engine is available
    async fn is_available(&self) -> bool;

    /// Get the name of the underlying engine
    fn provider_name(&self) -> &str;
}
