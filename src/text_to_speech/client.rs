//! Text to Speech v1 client: voices, HTTP synthesis and pronunciation.

use super::types::{Pronunciation, PronunciationOptions, SynthesizeOptions, Voice, Voices};
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::transport::{BaseService, BaseServiceBuilder, DetailedResponse};
use crate::validation::require_non_empty;
use crate::{BoxStream, Result};
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use std::sync::Arc;
use tracing::debug;

pub const SERVICE_NAME: &str = "text_to_speech";
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.text-to-speech.watson.cloud.ibm.com";

/// Client for speech synthesis and voice customization.
#[derive(Debug)]
pub struct TextToSpeechV1 {
    pub(super) service: BaseService,
}

impl TextToSpeechV1 {
    pub fn builder() -> TextToSpeechV1Builder {
        TextToSpeechV1Builder::new()
    }

    /// Client configured entirely from `TEXT_TO_SPEECH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub fn service(&self) -> &BaseService {
        &self.service
    }

    pub async fn list_voices(&self) -> Result<DetailedResponse<Voices>> {
        let request = self
            .service
            .request(Method::GET, &["v1", "voices"])
            .await?;
        self.service.send_json(request).await
    }

    /// Voice details; with `customization_id` the response embeds that model.
    pub async fn get_voice(
        &self,
        voice: &str,
        customization_id: Option<&str>,
    ) -> Result<DetailedResponse<Voice>> {
        require_non_empty(SERVICE_NAME, "voice", voice)?;
        let mut request = self
            .service
            .request(Method::GET, &["v1", "voices", voice])
            .await?;
        if let Some(id) = customization_id {
            request = request.query(&[("customization_id", id)]);
        }
        self.service.send_json(request).await
    }

    async fn synthesize_request(&self, options: &SynthesizeOptions) -> Result<RequestBuilder> {
        require_non_empty(SERVICE_NAME, "text", &options.text)?;
        let mut request = self
            .service
            .request(Method::POST, &["v1", "synthesize"])
            .await?
            .query(&options.query())
            .json(&serde_json::json!({ "text": options.text }));
        if let Some(format) = &options.accept {
            request = request.header(ACCEPT, format.mime_type());
        }
        debug!(
            chars = options.text.chars().count(),
            voice = options.voice.as_deref().unwrap_or("default"),
            "synthesize"
        );
        Ok(request)
    }

    /// Synthesize `options.text` and buffer the whole audio body.
    pub async fn synthesize(&self, options: &SynthesizeOptions) -> Result<DetailedResponse<Bytes>> {
        let request = self.synthesize_request(options).await?;
        self.service.send_bytes(request).await
    }

    /// Synthesize `options.text`, yielding audio chunks as they arrive.
    pub async fn synthesize_stream(
        &self,
        options: &SynthesizeOptions,
    ) -> Result<DetailedResponse<BoxStream<'static, Bytes>>> {
        let request = self.synthesize_request(options).await?;
        self.service.send_stream(request).await
    }

    pub async fn get_pronunciation(
        &self,
        options: &PronunciationOptions,
    ) -> Result<DetailedResponse<Pronunciation>> {
        require_non_empty(SERVICE_NAME, "text", &options.text)?;
        let request = self
            .service
            .request(Method::GET, &["v1", "pronunciation"])
            .await?
            .query(&options.query());
        self.service.send_json(request).await
    }
}

pub struct TextToSpeechV1Builder {
    inner: BaseServiceBuilder,
}

impl TextToSpeechV1Builder {
    pub fn new() -> Self {
        Self {
            inner: BaseService::builder(SERVICE_NAME).default_url(DEFAULT_SERVICE_URL),
        }
    }
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.service_url(url);
        self
    }
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.inner = self.inner.authenticator(authenticator);
        self
    }
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.inner = self.inner.apikey(apikey);
        self
    }
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.inner = self.inner.timeout_secs(secs);
        self
    }

    pub fn build(self) -> Result<TextToSpeechV1> {
        Ok(TextToSpeechV1 {
            service: self.inner.build()?,
        })
    }
}

impl Default for TextToSpeechV1Builder {
    fn default() -> Self {
        Self::new()
    }
}
