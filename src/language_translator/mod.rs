//! Language Translator v3: translation between language pairs, language
//! identification, and custom translation models.

mod client;
mod types;

pub use client::{
    LanguageTranslatorV3, LanguageTranslatorV3Builder, DEFAULT_SERVICE_URL, DEFAULT_VERSION,
    SERVICE_NAME,
};
pub use types::{
    CreateModelOptions, DeleteModelResult, IdentifiableLanguage, IdentifiableLanguages,
    IdentifiedLanguage, IdentifiedLanguages, Language, Languages, ListModelsOptions, TrainingData,
    TranslateOptions, Translation, TranslationModel, TranslationModels, TranslationResult,
};
