//! Google Translate Text-to-Speech Provider
//!
//! Implements `TextToSpeech` against the public `translate_tts` endpoint.
//! The endpoint accepts at most 100 characters per request, so longer text
//! is split into chunks whose MP3 segments are concatenated.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, SynthesisRequest, VoiceInfo};

/// Maximum characters per `translate_tts` request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Language codes accepted by the endpoint
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh-cn", "Chinese (Mandarin/China)"),
    ("zh-tw", "Chinese (Mandarin/Taiwan)"),
];

/// Characters that end a chunk even when the limit is not reached
const BREAK_CHARS: &[char] = &['.', '!', '?', ';', ':', '\n', '。', '！', '？', '؟', '،'];

/// Networked TTS provider using Google Translate
#[derive(Debug, Clone)]
pub struct GoogleTranslateTtsProvider {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl GoogleTranslateTtsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.google.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Whether the endpoint accepts this language code
    #[must_use]
    pub fn supports_language(language: &str) -> bool {
        LANGUAGES.iter().any(|(code, _)| *code == language)
    }

    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        slow: bool,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();
        let speed = if slow { "0.3" } else { "1" };

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("client", "tw-ob"),
                ("ttsspeed", speed),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout(self.timeout_ms)
                } else {
                    SpeechError::from(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SpeechError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Google TTS request failed");
            return Err(SpeechError::RequestFailed(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))
    }
}

#[async_trait]
impl TextToSpeech for GoogleTranslateTtsProvider {
    #[instrument(skip(self, request), fields(
        text_len = request.text.len(),
        language = %request.language,
        slow = request.slow
    ))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
        let language = request.language.trim().to_lowercase();
        if !Self::supports_language(&language) {
            return Err(SpeechError::UnsupportedLanguage(request.language.clone()));
        }

        let chunks = split_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::SynthesisFailed("No text to speak".to_string()));
        }

        debug!(chunks = chunks.len(), "Synthesizing speech with Google TTS");

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let segment = self
                .fetch_chunk(chunk, &language, request.slow, idx, chunks.len())
                .await?;
            audio.extend_from_slice(&segment);
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Google TTS returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        Ok(LANGUAGES
            .iter()
            .map(|(code, name)| {
                let mut voice = VoiceInfo::new(*code, *name);
                voice.languages = vec![(*code).to_string()];
                voice
            })
            .collect())
    }

    async fn is_available(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Google TTS not reachable");
                false
            },
        }
    }

    fn provider_name(&self) -> &str {
        "google-translate-tts"
    }
}

/// Split text into chunks of at most `limit` characters
///
/// Sentence punctuation always ends a chunk. Within a sentence, words are
/// packed greedily; a single word longer than `limit` is cut.
pub fn split_text(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();

    for sentence in text.split_inclusive(BREAK_CHARS) {
        let mut current = String::new();
        let mut current_len = 0;

        for word in sentence.split_whitespace() {
            for piece in cut_word(word, limit) {
                let piece_len = piece.chars().count();
                let needed = if current.is_empty() {
                    piece_len
                } else {
                    current_len + 1 + piece_len
                };

                if needed > limit && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }

                if !current.is_empty() {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(piece);
                current_len += piece_len;
            }
        }

        if !is_blank_chunk(&current) {
            chunks.push(current);
        }
    }

    chunks
}

/// Chunks holding only punctuation produce no speech
fn is_blank_chunk(chunk: &str) -> bool {
    !chunk.chars().any(char::is_alphanumeric)
}

fn cut_word(word: &str, limit: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in word.char_indices() {
        if count == limit {
            pieces.push(&word[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }

    pieces
}
