//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use watson_lib_rust::auth::BearerTokenAuthenticator;
use watson_lib_rust::config::ServiceConfig;
use watson_lib_rust::{LanguageTranslatorV3, TextToSpeechV1};

pub const TOKEN: &str = "test-token";
pub const TRANSLATOR_VERSION: &str = "2019-03-27";

/// Test fixture that owns a mock server and builds clients pointed at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    fn authenticator() -> Arc<BearerTokenAuthenticator> {
        Arc::new(BearerTokenAuthenticator::new(TOKEN).expect("valid token"))
    }

    /// Translator client with a fixed bearer token; the environment is ignored.
    pub fn translator(&self) -> LanguageTranslatorV3 {
        LanguageTranslatorV3::builder()
            .config(ServiceConfig::default())
            .service_url(&self.base_url)
            .version(TRANSLATOR_VERSION)
            .authenticator(Self::authenticator())
            .build()
            .expect("Failed to build translator client")
    }

    pub fn text_to_speech(&self) -> TextToSpeechV1 {
        TextToSpeechV1::builder()
            .config(ServiceConfig::default())
            .service_url(&self.base_url)
            .authenticator(Self::authenticator())
            .build()
            .expect("Failed to build text to speech client")
    }

    /// JSON response for `method path`, requiring the bearer token.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Same as [`MockServerFixture::mock_json`] but also requires the translator
    /// `version` query parameter.
    pub async fn mock_versioned_json(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::UrlEncoded(
                "version".into(),
                TRANSLATOR_VERSION.into(),
            ))
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Empty-bodied success, as returned by the customization mutation endpoints.
    pub async fn mock_empty(&mut self, method: &str, path: &str, status: usize) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .create_async()
            .await
    }
}

/// Minimal 16-bit mono WAV payload.
pub fn wav_bytes(sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        for i in 0..64i16 {
            writer.write_sample(i * 100).expect("sample");
        }
        writer.finalize().expect("finalize");
    }
    cursor.into_inner()
}
