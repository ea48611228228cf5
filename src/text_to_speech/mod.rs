//! Text to Speech v1: voices, synthesis over HTTP or WebSocket, pronunciation
//! lookup, and custom voice models.

mod client;
mod customization;
mod types;
mod websocket;

pub use client::{TextToSpeechV1, TextToSpeechV1Builder, DEFAULT_SERVICE_URL, SERVICE_NAME};
pub use types::{
    CreateVoiceModelOptions, PhonemeFormat, Pronunciation, PronunciationOptions,
    SupportedFeatures, SynthesizeOptions, Translation, UpdateVoiceModelOptions, Voice, VoiceModel,
    VoiceModels, Voices, Word, Words,
};
pub use websocket::{Mark, SynthesisEvent, SynthesisStream, WordTiming};
