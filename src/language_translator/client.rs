//! Language Translator v3 client.

use super::types::{
    CreateModelOptions, DeleteModelResult, IdentifiableLanguages, IdentifiedLanguages,
    Languages, ListModelsOptions, TrainingData, TranslateOptions, TranslationModel,
    TranslationModels, TranslationResult,
};
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::transport::{BaseService, DetailedResponse};
use crate::validation::{require_non_empty, require_non_empty_list};
use crate::{Error, ErrorContext, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

pub const SERVICE_NAME: &str = "language_translator";
pub const DEFAULT_SERVICE_URL: &str =
    "https://api.us-south.language-translator.watson.cloud.ibm.com";
pub const DEFAULT_VERSION: &str = "2018-05-01";

/// Client for translation, language identification and custom translation models.
#[derive(Debug)]
pub struct LanguageTranslatorV3 {
    service: BaseService,
}

impl LanguageTranslatorV3 {
    pub fn builder() -> LanguageTranslatorV3Builder {
        LanguageTranslatorV3Builder::new()
    }

    /// Client configured entirely from `LANGUAGE_TRANSLATOR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub fn service(&self) -> &BaseService {
        &self.service
    }

    pub async fn list_models(
        &self,
        options: &ListModelsOptions,
    ) -> Result<DetailedResponse<TranslationModels>> {
        let request = self
            .service
            .request(Method::GET, &["v3", "models"])
            .await?
            .query(&options.query());
        self.service.send_json(request).await
    }

    pub async fn get_model(&self, model_id: &str) -> Result<DetailedResponse<TranslationModel>> {
        require_non_empty(SERVICE_NAME, "model_id", model_id)?;
        let request = self
            .service
            .request(Method::GET, &["v3", "models", model_id])
            .await?;
        self.service.send_json(request).await
    }

    /// Upload training data to adapt `base_model_id`. At least one of the glossary or
    /// corpus must be supplied.
    pub async fn create_model(
        &self,
        options: CreateModelOptions,
    ) -> Result<DetailedResponse<TranslationModel>> {
        require_non_empty(SERVICE_NAME, "base_model_id", &options.base_model_id)?;
        if options.forced_glossary.is_none() && options.parallel_corpus.is_none() {
            return Err(Error::validation_with_context(
                "forced_glossary or parallel_corpus is required",
                ErrorContext::new()
                    .with_field_path("forced_glossary")
                    .with_source(SERVICE_NAME),
            ));
        }

        let mut form = Form::new();
        if let Some(glossary) = options.forced_glossary {
            form = form.part("forced_glossary", training_part(glossary).await?);
        }
        if let Some(corpus) = options.parallel_corpus {
            form = form.part("parallel_corpus", training_part(corpus).await?);
        }

        let mut query = vec![("base_model_id", options.base_model_id)];
        if let Some(name) = options.name {
            query.push(("name", name));
        }
        let request = self
            .service
            .request(Method::POST, &["v3", "models"])
            .await?
            .query(&query)
            .multipart(form);
        self.service.send_json(request).await
    }

    pub async fn delete_model(&self, model_id: &str) -> Result<DetailedResponse<DeleteModelResult>> {
        require_non_empty(SERVICE_NAME, "model_id", model_id)?;
        let request = self
            .service
            .request(Method::DELETE, &["v3", "models", model_id])
            .await?;
        self.service.send_json(request).await
    }

    /// Translate `options.text`. A language pair needs either `model_id` or both
    /// `source` and `target`.
    pub async fn translate(
        &self,
        options: &TranslateOptions,
    ) -> Result<DetailedResponse<TranslationResult>> {
        require_non_empty_list(SERVICE_NAME, "text", &options.text)?;
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let has_model = filled(&options.model_id);
        let has_pair = filled(&options.source) && filled(&options.target);
        if !has_model && !has_pair {
            return Err(Error::validation_with_context(
                "either model_id or both source and target are required",
                ErrorContext::new()
                    .with_field_path("model_id")
                    .with_source(SERVICE_NAME),
            ));
        }
        debug!(
            segments = options.text.len(),
            model_id = options.model_id.as_deref().unwrap_or("-"),
            "translate"
        );
        let request = self
            .service
            .request(Method::POST, &["v3", "translate"])
            .await?
            .json(options);
        self.service.send_json(request).await
    }

    pub async fn list_identifiable_languages(
        &self,
    ) -> Result<DetailedResponse<IdentifiableLanguages>> {
        let request = self
            .service
            .request(Method::GET, &["v3", "identifiable_languages"])
            .await?;
        self.service.send_json(request).await
    }

    /// Identify the language of `text`, sent as a plain-text body.
    pub async fn identify(&self, text: &str) -> Result<DetailedResponse<IdentifiedLanguages>> {
        require_non_empty(SERVICE_NAME, "text", text)?;
        let request = self
            .service
            .request(Method::POST, &["v3", "identify"])
            .await?
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string());
        self.service.send_json(request).await
    }

    pub async fn list_languages(&self) -> Result<DetailedResponse<Languages>> {
        let request = self
            .service
            .request(Method::GET, &["v3", "languages"])
            .await?;
        self.service.send_json(request).await
    }
}

async fn training_part(data: TrainingData) -> Result<Part> {
    let (file_name, bytes) = match data {
        TrainingData::Bytes { file_name, data } => (file_name, data),
        TrainingData::Path(path) => {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "training.tmx".to_string());
            (file_name, bytes)
        }
    };
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/octet-stream")
        .map_err(|e| Error::configuration(format!("Invalid mime: {}", e)))
}

pub struct LanguageTranslatorV3Builder {
    inner: crate::transport::BaseServiceBuilder,
}

impl LanguageTranslatorV3Builder {
    pub fn new() -> Self {
        Self {
            inner: BaseService::builder(SERVICE_NAME)
                .default_url(DEFAULT_SERVICE_URL)
                .version(DEFAULT_VERSION),
        }
    }
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.service_url(url);
        self
    }
    /// API version date (`YYYY-MM-DD`) sent as the `version` query parameter.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner = self.inner.version(version);
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

    pub fn build(self) -> Result<LanguageTranslatorV3> {
        Ok(LanguageTranslatorV3 {
            service: self.inner.build()?,
        })
    }
}

impl Default for LanguageTranslatorV3Builder {
    fn default() -> Self {
        Self::new()
    }
}
