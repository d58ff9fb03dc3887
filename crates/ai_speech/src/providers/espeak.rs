//! eSpeak NG Offline Text-to-Speech Provider
//!
//! Implements `TextToSpeech` using the `espeak-ng` CLI. Output is WAV,
//! transcoded to MP3 through FFmpeg when enabled and available.
//!
//! # Prerequisites
//!
//! ```bash
//! sudo apt install espeak-ng ffmpeg
//! ```

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::SpeechConfig;
use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, SynthesisRequest, VoiceGender, VoiceInfo};

/// Offline TTS provider using eSpeak NG
#[derive(Debug, Clone)]
pub struct EspeakProvider {
    config: SpeechConfig,
    converter: AudioConverter,
}

impl EspeakProvider {
    /// Create a new eSpeak NG provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        let converter = AudioConverter::with_ffmpeg_path(config.ffmpeg_path.clone());
        Ok(Self { config, converter })
    }

    /// Get the eSpeak NG executable path
    fn executable(&self) -> &Path {
        &self.config.espeak.executable_path
    }

    fn spawn_error(&self, e: &std::io::Error) -> SpeechError {
        if e.kind() == std::io::ErrorKind::NotFound {
            SpeechError::NotAvailable(format!(
                "eSpeak NG not found at '{}'. Please install espeak-ng.",
                self.executable().display()
            ))
        } else {
            SpeechError::SynthesisFailed(format!("Failed to run espeak-ng: {e}"))
        }
    }

    /// Pick the requested voice if it is installed, otherwise none
    async fn resolve_voice(&self, requested: Option<&str>) -> Option<String> {
        let requested = requested?.trim();
        if requested.is_empty() {
            return None;
        }

        match self.list_voices().await {
            Ok(voices) if voices.iter().any(|v| v.id == requested) => {
                Some(requested.to_string())
            },
            Ok(_) => {
                debug!(voice = requested, "Voice not installed, using default voice");
                None
            },
            Err(e) => {
                warn!(error = %e, "Could not list voices, using default voice");
                None
            },
        }
    }

    /// Run eSpeak NG and return the WAV bytes
    #[instrument(skip(self, text), fields(voice = ?voice, text_len = text.len()))]
    async fn run_espeak(
        &self,
        text: &str,
        voice: Option<&str>,
        rate: u32,
        volume: f32,
    ) -> Result<Vec<u8>, SpeechError> {
        let output_file = NamedTempFile::with_suffix(".wav").map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to create temp file: {e}"))
        })?;

        let amplitude = (volume.clamp(0.0, 2.0) * 100.0).round() as u32;

        let mut cmd = Command::new(self.executable());
        cmd.arg("-s")
            .arg(rate.to_string())
            .arg("-a")
            .arg(amplitude.to_string());
        if let Some(voice) = voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("-w")
            .arg(output_file.path())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running espeak-ng: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(&e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|e| {
                SpeechError::SynthesisFailed(format!("Failed to write to espeak-ng stdin: {e}"))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to wait for espeak-ng: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("espeak-ng failed: {}", stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "espeak-ng exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let audio_data = tokio::fs::read(output_file.path()).await.map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to read espeak-ng output: {e}"))
        })?;

        if audio_data.is_empty() {
            warn!("espeak-ng produced empty output");
            return Err(SpeechError::SynthesisFailed(
                "espeak-ng produced empty output".to_string(),
            ));
        }

        Ok(audio_data)
    }
}

#[async_trait]
impl TextToSpeech for EspeakProvider {
    #[instrument(skip(self, request), fields(text_len = request.text.len(), rate = request.rate))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioData, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        let voice = self.resolve_voice(request.voice.as_deref()).await;
        let wav = self
            .run_espeak(&request.text, voice.as_deref(), request.rate, request.volume)
            .await?;
        let audio = AudioData::new(wav, AudioFormat::Wav);

        if !self.config.espeak.transcode_to_mp3 {
            return Ok(audio);
        }

        match self.converter.convert(&audio, AudioFormat::Mp3).await {
            Ok(mp3) => Ok(mp3),
            Err(e) => {
                warn!(error = %e, "MP3 transcoding failed, keeping WAV output");
                Ok(audio)
            },
        }
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let output = Command::new(self.executable())
            .arg("--voices")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(&e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::RequestFailed(format!(
                "espeak-ng --voices failed: {}",
                stderr.trim()
            )));
        }

        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn is_available(&self) -> bool {
        let available = Command::new(self.executable())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|s| s.success());

        debug!(available, "eSpeak NG availability");
        available
    }

    fn provider_name(&self) -> &str {
        "espeak-ng"
    }
}

/// Parse the table printed by `espeak-ng --voices`
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af              --/M      Afrikaans          gmw/af
///  2  en-us           --/M      English_(America)  gmw/en-US            (en-r 5)(en 5)
/// ```
pub fn parse_voice_list(listing: &str) -> Vec<VoiceInfo> {
    listing
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(parse_voice_line)
        .collect()
}

fn parse_voice_line(line: &str) -> Option<VoiceInfo> {
    let mut cols = line.split_whitespace();
    let _priority = cols.next()?;
    let language = cols.next()?;
    let age_gender = cols.next()?;
    let name = cols.next()?;
    let _file = cols.next()?;
    let rest: Vec<&str> = cols.collect();

    let mut voice = VoiceInfo::new(language, name.replace('_', " "));
    voice.languages.push(language.to_string());
    for other in other_languages(&rest.join(" ")) {
        if !voice.languages.contains(&other) {
            voice.languages.push(other);
        }
    }
    voice.gender = match age_gender.rsplit('/').next() {
        Some("M") => Some(VoiceGender::Male),
        Some("F") => Some(VoiceGender::Female),
        _ => None,
    };

    Some(voice)
}

/// Language codes from `(code priority)` groups
fn other_languages(rest: &str) -> Vec<String> {
    rest.split('(')
        .filter_map(|group| group.split(')').next())
        .filter_map(|inner| inner.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const LISTING: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 2  en-gb           --/M      English_(Great_Britain) gmw/en           (en 2)
 2  en-us           --/F      English_(America)  gmw/en-US            (en-r 5)(en 5)
 5  fr-fr           --/-      French_(France)    roa/fr               (fr 5)
";

    fn provider_with_executable(path: &str) -> EspeakProvider {
        let mut config = SpeechConfig::default();
        config.espeak.executable_path = PathBuf::from(path);
        config.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
        EspeakProvider::new(config).unwrap()
    }

    #[test]
    fn parses_voice_table() {
        let voices = parse_voice_list(LISTING);

        assert_eq!(voices.len(), 4);
        assert_eq!(voices[0].id, "af");
        assert_eq!(voices[0].name, "Afrikaans");
        assert_eq!(voices[0].languages, vec!["af"]);
        assert_eq!(voices[0].gender, Some(VoiceGender::Male));
    }

    #[test]
    fn parses_other_languages() {
        let voices = parse_voice_list(LISTING);

        assert_eq!(voices[1].name, "English (Great Britain)");
        assert_eq!(voices[1].languages, vec!["en-gb", "en"]);
        assert_eq!(voices[2].languages, vec!["en-us", "en-r", "en"]);
        assert_eq!(voices[2].gender, Some(VoiceGender::Female));
    }

    #[test]
    fn unknown_gender_is_none() {
        let voices = parse_voice_list(LISTING);
        assert_eq!(voices[3].gender, None);
    }

    #[test]
    fn empty_listing_has_no_voices() {
        assert!(parse_voice_list("").is_empty());
        assert!(parse_voice_list("Pty Language Age/Gender VoiceName File Other Languages\n").is_empty());
    }

    #[test]
    fn provider_name_is_espeak() {
        let provider = provider_with_executable("espeak-ng");
        assert_eq!(provider.provider_name(), "espeak-ng");
    }

    #[tokio::test]
    async fn missing_executable_is_not_available() {
        let provider = provider_with_executable("/nonexistent/espeak-ng");

        assert!(!provider.is_available().await);
        assert!(matches!(
            provider.list_voices().await,
            Err(SpeechError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn synthesize_without_executable_fails() {
        let provider = provider_with_executable("/nonexistent/espeak-ng");

        let result = provider.synthesize(&SynthesisRequest::new("Hello")).await;

        assert!(matches!(result, Err(SpeechError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn synthesize_empty_text_fails() {
        let provider = provider_with_executable("/nonexistent/espeak-ng");

        let result = provider.synthesize(&SynthesisRequest::new("  ")).await;

        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }
}
