//! Language Translator v3 request and response types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for [`translate`](super::LanguageTranslatorV3::translate).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslateOptions {
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TranslateOptions {
    /// Translate a single string between a language pair.
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: vec![text.into()],
            model_id: None,
            source: Some(source.into()),
            target: Some(target.into()),
        }
    }

    /// Translate with an explicit model such as `en-es` or a custom model id.
    pub fn with_model(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            text: vec![text.into()],
            model_id: Some(model_id.into()),
            source: None,
            target: None,
        }
    }

    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub character_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language_confidence: Option<f64>,
    pub translations: Vec<Translation>,
}

impl TranslationResult {
    /// First translated string, which is the only one for single-text requests.
    pub fn first(&self) -> Option<&str> {
        self.translations.first().map(|t| t.translation.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationModel {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// `uploading`, `uploaded`, `dispatching`, `queued`, `training`, `trained`,
    /// `publishing`, `available`, `deleted` or `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationModels {
    pub models: Vec<TranslationModel>,
}

/// Filters for [`list_models`](super::LanguageTranslatorV3::list_models).
#[derive(Debug, Clone, Default)]
pub struct ListModelsOptions {
    pub source: Option<String>,
    pub target: Option<String>,
    /// `Some(true)` lists only default models, `Some(false)` only non-default ones.
    pub default: Option<bool>,
}

impl ListModelsOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(source) = &self.source {
            query.push(("source", source.clone()));
        }
        if let Some(target) = &self.target {
            query.push(("target", target.clone()));
        }
        if let Some(default) = self.default {
            query.push(("default", default.to_string()));
        }
        query
    }
}

/// Training data for a custom model, uploaded as a multipart file.
#[derive(Debug, Clone)]
pub enum TrainingData {
    Bytes { file_name: String, data: Vec<u8> },
    Path(PathBuf),
}

/// Options for [`create_model`](super::LanguageTranslatorV3::create_model).
#[derive(Debug, Clone, Default)]
pub struct CreateModelOptions {
    pub base_model_id: String,
    pub name: Option<String>,
    /// TMX glossary whose terms always override the base model.
    pub forced_glossary: Option<TrainingData>,
    /// TMX parallel corpus used to adapt the base model.
    pub parallel_corpus: Option<TrainingData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteModelResult {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiableLanguage {
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiableLanguages {
    pub languages: Vec<IdentifiableLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedLanguage {
    pub language: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedLanguages {
    pub languages: Vec<IdentifiedLanguage>,
}

impl IdentifiedLanguages {
    /// Candidate with the highest confidence.
    pub fn best(&self) -> Option<&IdentifiedLanguage> {
        self.languages
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_language_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_as_source: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_as_target: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Languages {
    pub languages: Vec<Language>,
}
