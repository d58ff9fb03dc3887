//! AI Speech - Text-to-Speech engines
//!
//! Provides the `TextToSpeech` port and two engines behind it:
//! - `GoogleTranslateTtsProvider` - networked synthesis (engine `gtts`)
//! - `EspeakProvider` - offline synthesis through eSpeak NG (engine `pyttsx3`)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleTranslateTtsProvider, SynthesisRequest, TextToSpeech};
//!
//! let provider = GoogleTranslateTtsProvider::new(&config)?;
//! let request = SynthesisRequest::new("Hello, world!").with_language("en");
//! let audio = provider.synthesize(&request).await?;
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{EspeakConfig, GoogleTtsConfig, SpeechConfig};
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::espeak::EspeakProvider;
pub use providers::google_translate::GoogleTranslateTtsProvider;
pub use types::{AudioData, AudioFormat, SpeechEngine, SynthesisRequest, VoiceGender, VoiceInfo};
