//! Voice customization: custom voice models and the words inside them.
//!
//! A model is scoped to one language and owned by the credentials that created
//! it. Word entries are unique per model; the service replaces an existing
//! entry when the same word is added again.

use super::client::{TextToSpeechV1, SERVICE_NAME};
use super::types::{
    CreateVoiceModelOptions, Translation, UpdateVoiceModelOptions, VoiceModel, VoiceModels, Word,
    Words,
};
use crate::transport::DetailedResponse;
use crate::validation::{require_non_empty, require_non_empty_list};
use crate::Result;
use reqwest::Method;
use tracing::info;

impl TextToSpeechV1 {
    pub async fn create_voice_model(
        &self,
        options: &CreateVoiceModelOptions,
    ) -> Result<DetailedResponse<VoiceModel>> {
        require_non_empty(SERVICE_NAME, "name", &options.name)?;
        let request = self
            .service
            .request(Method::POST, &["v1", "customizations"])
            .await?
            .json(options);
        let response: DetailedResponse<VoiceModel> = self.service.send_json(request).await?;
        info!(
            customization_id = %response.result.customization_id,
            "created voice model"
        );
        Ok(response)
    }

    /// Models owned by the caller, optionally only those for `language` (e.g. `en-GB`).
    pub async fn list_voice_models(
        &self,
        language: Option<&str>,
    ) -> Result<DetailedResponse<VoiceModels>> {
        let mut request = self
            .service
            .request(Method::GET, &["v1", "customizations"])
            .await?;
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }
        self.service.send_json(request).await
    }

    pub async fn update_voice_model(
        &self,
        customization_id: &str,
        options: &UpdateVoiceModelOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        let request = self
            .service
            .request(Method::POST, &["v1", "customizations", customization_id])
            .await?
            .json(options);
        self.service.send_empty(request).await
    }

    pub async fn get_voice_model(
        &self,
        customization_id: &str,
    ) -> Result<DetailedResponse<VoiceModel>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        let request = self
            .service
            .request(Method::GET, &["v1", "customizations", customization_id])
            .await?;
        self.service.send_json(request).await
    }

    pub async fn delete_voice_model(&self, customization_id: &str) -> Result<DetailedResponse<()>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        let request = self
            .service
            .request(Method::DELETE, &["v1", "customizations", customization_id])
            .await?;
        let response = self.service.send_empty(request).await?;
        info!(customization_id, "deleted voice model");
        Ok(response)
    }

    pub async fn add_words(
        &self,
        customization_id: &str,
        words: &[Word],
    ) -> Result<DetailedResponse<()>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        require_non_empty_list(SERVICE_NAME, "words", words)?;
        let request = self
            .service
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "words"],
            )
            .await?
            .json(&serde_json::json!({ "words": words }));
        self.service.send_empty(request).await
    }

    pub async fn list_words(&self, customization_id: &str) -> Result<DetailedResponse<Words>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        let request = self
            .service
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words"],
            )
            .await?;
        self.service.send_json(request).await
    }

    pub async fn add_word(
        &self,
        customization_id: &str,
        word: &str,
        translation: &Translation,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        require_non_empty(SERVICE_NAME, "word", word)?;
        require_non_empty(SERVICE_NAME, "translation", &translation.translation)?;
        let request = self
            .service
            .request(
                Method::PUT,
                &["v1", "customizations", customization_id, "words", word],
            )
            .await?
            .json(translation);
        self.service.send_empty(request).await
    }

    pub async fn get_word(
        &self,
        customization_id: &str,
        word: &str,
    ) -> Result<DetailedResponse<Translation>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        require_non_empty(SERVICE_NAME, "word", word)?;
        let request = self
            .service
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words", word],
            )
            .await?;
        self.service.send_json(request).await
    }

    pub async fn delete_word(&self, customization_id: &str, word: &str) -> Result<DetailedResponse<()>> {
        require_non_empty(SERVICE_NAME, "customization_id", customization_id)?;
        require_non_empty(SERVICE_NAME, "word", word)?;
        let request = self
            .service
            .request(
                Method::DELETE,
                &["v1", "customizations", customization_id, "words", word],
            )
            .await?;
        self.service.send_empty(request).await
    }
}
