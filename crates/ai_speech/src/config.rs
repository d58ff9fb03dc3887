//! Configuration for speech processing

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for speech synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// FFmpeg binary used for WAV to MP3 transcoding
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Networked engine settings
    #[serde(default)]
    pub google: GoogleTtsConfig,

    /// Offline engine settings
    #[serde(default)]
    pub espeak: EspeakConfig,
}

/// Configuration for Google Translate TTS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTtsConfig {
    /// Service base URL (without the `/translate_tts` path)
    #[serde(default = "default_google_base_url")]
    pub base_url: String,

    /// Language used when a request does not name one
    #[serde(default = "default_language")]
    pub default_language: String,
}

/// Configuration for eSpeak NG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EspeakConfig {
    /// Path to the eSpeak NG executable
    #[serde(default = "default_espeak_path")]
    pub executable_path: PathBuf,

    /// Speaking rate in words per minute
    #[serde(default = "default_rate")]
    pub default_rate: u32,

    /// Transcode WAV output to MP3 through FFmpeg
    #[serde(default = "default_transcode")]
    pub transcode_to_mp3: bool,
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_google_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_espeak_path() -> PathBuf {
    PathBuf::from("espeak-ng")
}

const fn default_rate() -> u32 {
    200
}

const fn default_transcode() -> bool {
    true
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            ffmpeg_path: default_ffmpeg_path(),
            google: GoogleTtsConfig::default(),
            espeak: EspeakConfig::default(),
        }
    }
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
            default_language: default_language(),
        }
    }
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            executable_path: default_espeak_path(),
            default_rate: default_rate(),
            transcode_to_mp3: default_transcode(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if !self.google.base_url.starts_with("http://")
            && !self.google.base_url.starts_with("https://")
        {
            return Err(format!(
                "Google TTS base URL must be an http(s) URL, got '{}'",
                self.google.base_url
            ));
        }

        if self.espeak.default_rate == 0 {
            return Err("eSpeak default_rate must be greater than 0".to_string());
        }

        Ok(())
    }
}
