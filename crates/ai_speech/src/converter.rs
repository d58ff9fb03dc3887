//! Audio format converter for speech output
//!
//! The offline engine produces WAV; responses are served as MP3 when FFmpeg
//! is installed.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::types::{AudioData, AudioFormat};

/// Audio converter for transforming between audio formats
///
/// Uses FFmpeg for audio conversion. FFmpeg must be installed on the system.
#[derive(Debug, Clone, Default)]
pub struct AudioConverter {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioConverter {
    /// Create a new audio converter with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a new audio converter with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    /// Get the FFmpeg binary path
    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Convert audio data to the target format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - FFmpeg is not available
    /// - The conversion fails
    #[instrument(skip(self, audio), fields(
        input_format = %audio.format(),
        target_format = %target_format
    ))]
    pub async fn convert(
        &self,
        audio: &AudioData,
        target_format: AudioFormat,
    ) -> Result<AudioData, SpeechError> {
        if audio.format() == target_format {
            debug!("Audio already in target format, skipping conversion");
            return Ok(audio.clone());
        }

        // pipe:0 is stdin, pipe:1 is stdout
        let mut cmd = Command::new(self.ffmpeg_path());
        cmd.arg("-i")
            .arg("pipe:0")
            .arg("-f")
            .arg(Self::format_to_ffmpeg(target_format))
            .arg("-y")
            .arg("-loglevel")
            .arg("error");
        Self::add_format_options(&mut cmd, target_format);
        cmd.arg("pipe:1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(audio.data()).await.map_err(|e| {
                SpeechError::AudioProcessing(format!("Failed to write to FFmpeg stdin: {e}"))
            })?;
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to wait for FFmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::AudioProcessing(format!(
                "FFmpeg conversion failed: {stderr}"
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::AudioProcessing(
                "FFmpeg produced empty output".to_string(),
            ));
        }

        debug!(output_size = output.stdout.len(), "Conversion successful");

        Ok(AudioData::new(output.stdout, target_format))
    }

    /// Get the FFmpeg format name for an audio format
    const fn format_to_ffmpeg(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    /// Add format-specific encoding options
    fn add_format_options(cmd: &mut Command, format: AudioFormat) {
        match format {
            AudioFormat::Mp3 => {
                // Good quality for speech
                cmd.args(["-codec:a", "libmp3lame", "-q:a", "2"]);
            },
            AudioFormat::Wav => {
                cmd.args(["-codec:a", "pcm_s16le"]);
            },
        }
    }
}
