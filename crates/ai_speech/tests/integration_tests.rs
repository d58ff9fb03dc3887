//! Integration tests for ai_speech crate
//!
//! Tests the networked engine against a mocked `translate_tts` endpoint and
//! the offline engine against a stand-in `espeak-ng` script.

use ai_speech::{
    AudioFormat, GoogleTranslateTtsProvider, SpeechConfig, SpeechError, SynthesisRequest,
    TextToSpeech,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test configuration pointing to mock server
fn test_config(base_url: &str) -> SpeechConfig {
    let mut config = SpeechConfig {
        timeout_ms: 5000,
        ..Default::default()
    };
    config.google.base_url = base_url.to_string();
    config
}

/// Minimal MP3 frame header
fn mock_mp3_segment(marker: u8) -> Vec<u8> {
    vec![0xFF, 0xFB, 0x90, marker]
}

// ============ Google Translate TTS ============

#[tokio::test]
async fn gtts_single_chunk_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("q", "Hello world"))
        .and(query_param("tl", "en"))
        .and(query_param("client", "tw-ob"))
        .and(query_param("ttsspeed", "1"))
        .and(query_param("total", "1"))
        .and(query_param("idx", "0"))
        .and(query_param("textlen", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(mock_mp3_segment(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri()))
        .expect("Failed to create provider");

    let audio = provider
        .synthesize(&SynthesisRequest::new("Hello world"))
        .await
        .expect("Synthesis should succeed");

    assert_eq!(audio.format(), AudioFormat::Mp3);
    assert_eq!(audio.data(), mock_mp3_segment(1).as_slice());
}

#[tokio::test]
async fn gtts_concatenates_chunks_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "0"))
        .and(query_param("total", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(mock_mp3_segment(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "1"))
        .and(query_param("total", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(mock_mp3_segment(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();

    let audio = provider
        .synthesize(&SynthesisRequest::new("First sentence. Second sentence."))
        .await
        .unwrap();

    let mut expected = mock_mp3_segment(1);
    expected.extend(mock_mp3_segment(2));
    assert_eq!(audio.data(), expected.as_slice());
}

#[tokio::test]
async fn gtts_slow_flag_sets_speed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("ttsspeed", "0.3"))
        .and(query_param("tl", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(mock_mp3_segment(3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();
    let request = SynthesisRequest::new("Guten Tag")
        .with_language("DE")
        .with_slow(true);

    let result = provider.synthesize(&request).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn gtts_server_error_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();

    let result = provider.synthesize(&SynthesisRequest::new("Hello")).await;

    match result {
        Err(SpeechError::RequestFailed(message)) => assert!(message.contains("500")),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn gtts_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();

    let result = provider.synthesize(&SynthesisRequest::new("Hello")).await;

    assert!(matches!(result, Err(SpeechError::RateLimited)));
}

#[tokio::test]
async fn gtts_unreachable_service_fails() {
    let provider = GoogleTranslateTtsProvider::new(&test_config("http://127.0.0.1:1")).unwrap();

    let result = provider.synthesize(&SynthesisRequest::new("Hello")).await;

    assert!(result.is_err());
    assert!(!provider.is_available().await);
}

#[tokio::test]
async fn gtts_unsupported_language_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();
    let request = SynthesisRequest::new("Hello").with_language("klingon");

    let result = provider.synthesize(&request).await;

    assert!(matches!(result, Err(SpeechError::UnsupportedLanguage(_))));
}

#[tokio::test]
async fn gtts_is_available_when_reachable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let provider = GoogleTranslateTtsProvider::new(&test_config(&mock_server.uri())).unwrap();

    assert!(provider.is_available().await);
}

// ============ eSpeak NG ============

#[cfg(unix)]
mod espeak {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use ai_speech::{EspeakProvider, VoiceGender};

    use super::*;

    const FAKE_ESPEAK: &str = r#"#!/bin/sh
if [ "$1" = "--voices" ]; then
  echo "Pty Language       Age/Gender VoiceName          File                 Other Languages"
  echo " 5  af              --/M      Afrikaans          gmw/af"
  echo " 2  en-gb           --/F      English_(Great_Britain) gmw/en           (en 2)"
  exit 0
fi
echo "$@" >> "$(dirname "$0")/args.log"
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -w) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
cat > "$(dirname "$0")/stdin.log"
printf 'RIFFfakewave' > "$out"
"#;

    fn install_fake_espeak(dir: &Path) -> PathBuf {
        let script = dir.join("espeak-ng");
        std::fs::write(&script, FAKE_ESPEAK).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn provider(script: PathBuf) -> EspeakProvider {
        let mut config = SpeechConfig::default();
        config.espeak.executable_path = script;
        config.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
        EspeakProvider::new(config).unwrap()
    }

    // Single test so the script is never executed while another test
    // thread still holds it open for writing.
    #[tokio::test]
    async fn espeak_with_stand_in_binary() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(install_fake_espeak(dir.path()));

        // Voices come from the --voices table
        let voices = provider.list_voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].id, "en-gb");
        assert_eq!(voices[1].gender, Some(VoiceGender::Female));

        // Installed voice is passed through, FFmpeg missing keeps WAV
        let request = SynthesisRequest::new("Hello there")
            .with_voice("en-gb")
            .with_rate(150);
        let audio = provider.synthesize(&request).await.unwrap();
        assert_eq!(audio.format(), AudioFormat::Wav);
        assert_eq!(audio.data(), b"RIFFfakewave");

        let args = std::fs::read_to_string(dir.path().join("args.log")).unwrap();
        let first = args.lines().next().unwrap();
        assert!(first.starts_with("-s 150 -a 100 -v en-gb -w "), "args: {first}");
        let stdin = std::fs::read_to_string(dir.path().join("stdin.log")).unwrap();
        assert_eq!(stdin, "Hello there");

        // Unknown voice falls back to the default voice
        let request = SynthesisRequest::new("Again").with_voice("does-not-exist");
        provider.synthesize(&request).await.unwrap();
        let args = std::fs::read_to_string(dir.path().join("args.log")).unwrap();
        let second = args.lines().nth(1).unwrap();
        assert!(!second.contains("-v "), "args: {second}");
        assert!(second.starts_with("-s 200 -a 100 -w "), "args: {second}");
    }
}
