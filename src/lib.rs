//! # watson-lib-rust
//!
//! Async Rust client for two cloud language services:
//!
//! - **Language Translator v3**: translation between language pairs, language
//!   identification, and custom translation models.
//! - **Text to Speech v1**: voices, synthesis over HTTP or WebSocket,
//!   pronunciation lookup, and custom voice models with word overrides.
//!
//! ## Overview
//!
//! Each service is a thin client over a shared [`transport::BaseService`]: it
//! serializes parameters, asks its [`auth::Authenticator`] for an
//! `Authorization` header, issues the call, and deserializes the response into a
//! [`DetailedResponse`] that also carries the HTTP status and headers. Failed
//! calls become [`Error::Remote`] with the HTTP status and a canonical
//! [`error_code::StandardErrorCode`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use watson_lib_rust::language_translator::{LanguageTranslatorV3, TranslateOptions};
//! use watson_lib_rust::text_to_speech::{SynthesizeOptions, TextToSpeechV1};
//! use watson_lib_rust::audio::AudioFormat;
//!
//! #[tokio::main]
//! async fn main() -> watson_lib_rust::Result<()> {
//!     // Reads LANGUAGE_TRANSLATOR_URL / LANGUAGE_TRANSLATOR_APIKEY.
//!     let translator = LanguageTranslatorV3::from_env()?;
//!     let response = translator
//!         .translate(&TranslateOptions::new("this is a test", "en", "es"))
//!         .await?;
//!     println!("{:?}", response.result.first());
//!
//!     let tts = TextToSpeechV1::builder()
//!         .service_url("https://api.us-south.text-to-speech.watson.cloud.ibm.com")
//!         .apikey("your-api-key")
//!         .build()?;
//!     let audio = tts
//!         .synthesize(
//!             &SynthesizeOptions::new("test")
//!                 .accept(AudioFormat::Wav)
//!                 .voice("en-US_LisaVoice"),
//!         )
//!         .await?;
//!     println!("{} bytes of audio", audio.result.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`language_translator`] | Language Translator v3 client and types |
//! | [`text_to_speech`] | Text to Speech v1 client, customization and WebSocket synthesis |
//! | [`auth`] | IAM, basic, bearer-token and no-op authenticators |
//! | [`config`] | `<SERVICE>_*` environment configuration |
//! | [`transport`] | Shared request pipeline and [`DetailedResponse`] |
//! | [`audio`] | Audio mime types and WAV header inspection |
//! | [`error_code`] | HTTP status classification |

pub mod audio;
pub mod auth;
pub mod config;
pub mod error_code;
pub mod language_translator;
pub mod text_to_speech;
pub mod transport;

mod validation;

pub use language_translator::LanguageTranslatorV3;
pub use text_to_speech::TextToSpeechV1;
pub use transport::DetailedResponse;

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
