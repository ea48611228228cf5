//! Audio formats accepted by the synthesis endpoints, and WAV header checks.

use crate::{Error, Result};
use std::io::Cursor;

/// Output formats supported by the synthesis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Basic,
    Flac,
    L16 { rate: u32 },
    Mp3,
    Mpeg,
    Mulaw { rate: u32 },
    Ogg,
    OggOpus,
    OggVorbis,
    Wav,
    Webm,
    WebmOpus,
    WebmVorbis,
}

impl AudioFormat {
    /// Value for the `Accept` header / WebSocket `accept` field.
    pub fn mime_type(&self) -> String {
        match self {
            Self::Basic => "audio/basic".into(),
            Self::Flac => "audio/flac".into(),
            Self::L16 { rate } => format!("audio/l16;rate={}", rate),
            Self::Mp3 => "audio/mp3".into(),
            Self::Mpeg => "audio/mpeg".into(),
            Self::Mulaw { rate } => format!("audio/mulaw;rate={}", rate),
            Self::Ogg => "audio/ogg".into(),
            Self::OggOpus => "audio/ogg;codecs=opus".into(),
            Self::OggVorbis => "audio/ogg;codecs=vorbis".into(),
            Self::Wav => "audio/wav".into(),
            Self::Webm => "audio/webm".into(),
            Self::WebmOpus => "audio/webm;codecs=opus".into(),
            Self::WebmVorbis => "audio/webm;codecs=vorbis".into(),
        }
    }

    /// Parse a mime type such as `audio/ogg; codecs=opus` or `audio/l16;rate=22050`.
    ///
    /// Whitespace and case are ignored, and unknown parameters are dropped.
    /// `l16` and `mulaw` require a `rate` parameter.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let normalized = mime.to_ascii_lowercase().replace(' ', "");
        let mut parts = normalized.split(';');
        let essence = parts.next()?;
        let mut codecs = None;
        let mut rate = None;
        for param in parts {
            match param.split_once('=') {
                Some(("codecs", v)) => codecs = Some(v.to_string()),
                Some(("rate", v)) => rate = v.parse::<u32>().ok(),
                _ => {}
            }
        }
        let format = match (essence, codecs.as_deref()) {
            ("audio/basic", _) => Self::Basic,
            ("audio/flac", _) => Self::Flac,
            ("audio/l16", _) => Self::L16 { rate: rate? },
            ("audio/mp3", _) => Self::Mp3,
            ("audio/mpeg", _) => Self::Mpeg,
            ("audio/mulaw", _) => Self::Mulaw { rate: rate? },
            ("audio/ogg", Some("opus")) => Self::OggOpus,
            ("audio/ogg", Some("vorbis")) => Self::OggVorbis,
            ("audio/ogg", _) => Self::Ogg,
            ("audio/wav" | "audio/wave" | "audio/x-wav", _) => Self::Wav,
            ("audio/webm", Some("opus")) => Self::WebmOpus,
            ("audio/webm", Some("vorbis")) => Self::WebmVorbis,
            ("audio/webm", _) => Self::Webm,
            _ => return None,
        };
        Some(format)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Basic | Self::Mulaw { .. } => "au",
            Self::Flac => "flac",
            Self::L16 { .. } => "pcm",
            Self::Mp3 | Self::Mpeg => "mp3",
            Self::Ogg | Self::OggOpus | Self::OggVorbis => "ogg",
            Self::Wav => "wav",
            Self::Webm | Self::WebmOpus | Self::WebmVorbis => "webm",
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::OggOpus
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mime_type())
    }
}

/// Header fields of a WAV payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

/// Validate the RIFF/WAVE header of `data` and return its format.
pub fn inspect_wav(data: &[u8]) -> Result<WavInfo> {
    if data.len() < 12 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(Error::Audio {
            message: "not a RIFF/WAVE payload".to_string(),
        });
    }
    let reader = hound::WavReader::new(Cursor::new(data))?;
    let spec = reader.spec();
    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
    })
}
