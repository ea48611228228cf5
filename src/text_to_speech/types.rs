//! Text to Speech v1 request and response types.

use crate::audio::AudioFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedFeatures {
    #[serde(default)]
    pub custom_pronunciation: bool,
    #[serde(default)]
    pub voice_transformation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub customizable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_features: Option<SupportedFeatures>,
    /// Present when the voice was fetched with a `customization_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<VoiceModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voices {
    pub voices: Vec<Voice>,
}

/// Options for [`synthesize`](super::TextToSpeechV1::synthesize) and its streaming variants.
#[derive(Debug, Clone, Default)]
pub struct SynthesizeOptions {
    pub text: String,
    /// Output format; the service default (`audio/ogg;codecs=opus`) when unset.
    pub accept: Option<AudioFormat>,
    pub voice: Option<String>,
    pub customization_id: Option<String>,
    /// WebSocket only: request `words` timings.
    pub word_timings: bool,
}

impl SynthesizeOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn accept(mut self, format: AudioFormat) -> Self {
        self.accept = Some(format);
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn customization_id(mut self, id: impl Into<String>) -> Self {
        self.customization_id = Some(id.into());
        self
    }

    pub fn word_timings(mut self, enabled: bool) -> Self {
        self.word_timings = enabled;
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(voice) = &self.voice {
            query.push(("voice", voice.clone()));
        }
        if let Some(id) = &self.customization_id {
            query.push(("customization_id", id.clone()));
        }
        query
    }
}

/// Phoneme notation for [`get_pronunciation`](super::TextToSpeechV1::get_pronunciation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhonemeFormat {
    Ipa,
    Ibm,
}

impl PhonemeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipa => "ipa",
            Self::Ibm => "ibm",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PronunciationOptions {
    pub text: String,
    pub voice: Option<String>,
    pub format: Option<PhonemeFormat>,
    pub customization_id: Option<String>,
}

impl PronunciationOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("text", self.text.clone())];
        if let Some(voice) = &self.voice {
            query.push(("voice", voice.clone()));
        }
        if let Some(format) = self.format {
            query.push(("format", format.as_str().to_string()));
        }
        if let Some(id) = &self.customization_id {
            query.push(("customization_id", id.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub pronunciation: String,
}

/// A custom word and how it should be spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    /// Sounds-like spelling, or a phonetic string in SSML `<phoneme>` form.
    pub translation: String,
    /// Japanese only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl Word {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            part_of_speech: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Words {
    pub words: Vec<Word>,
}

/// Translation of a single word, as returned by `get_word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

/// A custom voice model. List responses omit `words`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModel {
    pub customization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModels {
    pub customizations: Vec<VoiceModel>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVoiceModelOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateVoiceModelOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Fields to change on an existing voice model. `words` are added or replaced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateVoiceModelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}
