//! Streaming synthesis over a WebSocket.
//!
//! The client opens `/v1/synthesize` with `voice` and `customization_id` as
//! query parameters, sends one JSON text frame with the text and audio format,
//! then reads frames until the service closes the connection. Binary frames
//! are audio; text frames carry the content type, timings, warnings or an
//! error.

use super::client::{TextToSpeechV1, SERVICE_NAME};
use super::types::SynthesizeOptions;
use crate::transport::extract_error_message;
use crate::validation::require_non_empty;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::stream::{self, Stream};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WebSocketConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Start and end time, in seconds, of one spoken word.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(String, f64, f64)")]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl From<(String, f64, f64)> for WordTiming {
    fn from((word, start, end): (String, f64, f64)) -> Self {
        Self { word, start, end }
    }
}

/// Time, in seconds, at which an SSML `<mark>` was reached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(String, f64)")]
pub struct Mark {
    pub name: String,
    pub time: f64,
}

impl From<(String, f64)> for Mark {
    fn from((name, time): (String, f64)) -> Self {
        Self { name, time }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisEvent {
    /// Mime type of the audio that follows.
    ContentType(String),
    Audio(Bytes),
    Words(Vec<WordTiming>),
    Marks(Vec<Mark>),
    Warning(String),
}

#[derive(Debug, Deserialize)]
struct BinaryStream {
    content_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    binary_streams: Option<Vec<BinaryStream>>,
    #[serde(default)]
    words: Option<Vec<WordTiming>>,
    #[serde(default)]
    marks: Option<Vec<Mark>>,
    #[serde(default)]
    warnings: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode one text frame. An `error` field fails the whole synthesis.
fn parse_text_frame(text: &str) -> Result<Vec<SynthesisEvent>> {
    let message: ServerMessage = serde_json::from_str(text)?;
    if let Some(error) = message.error {
        return Err(Error::websocket_with_context(
            error,
            ErrorContext::new().with_source(SERVICE_NAME),
        ));
    }
    let mut events = Vec::new();
    if let Some(streams) = message.binary_streams {
        events.extend(
            streams
                .into_iter()
                .map(|s| SynthesisEvent::ContentType(s.content_type)),
        );
    }
    if let Some(words) = message.words {
        events.push(SynthesisEvent::Words(words));
    }
    if let Some(marks) = message.marks {
        events.push(SynthesisEvent::Marks(marks));
    }
    if let Some(warning) = message.warnings {
        events.push(SynthesisEvent::Warning(warning));
    }
    Ok(events)
}

/// Events of one WebSocket synthesis, ending when the service closes the socket.
pub struct SynthesisStream {
    inner: BoxStream<'static, SynthesisEvent>,
}

impl SynthesisStream {
    fn new(connection: WebSocketConnection) -> Self {
        let events = stream::unfold(Some(connection), |state| async move {
            let mut connection = state?;
            loop {
                let frame = match connection.next().await {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => return Some((vec![Err(Error::from(e))], None)),
                    None => return None,
                };
                match frame {
                    Message::Binary(data) => {
                        debug!(bytes = data.len(), "synthesis audio chunk");
                        return Some((vec![Ok(SynthesisEvent::Audio(data))], Some(connection)));
                    }
                    Message::Text(text) => match parse_text_frame(text.as_str()) {
                        Ok(events) if events.is_empty() => {
                            debug!("ignoring synthesis message: {}", text.as_str());
                        }
                        Ok(events) => {
                            let events = events.into_iter().map(Ok).collect();
                            return Some((events, Some(connection)));
                        }
                        Err(e) => {
                            warn!("synthesis failed: {}", e);
                            return Some((vec![Err(e)], None));
                        }
                    },
                    Message::Close(frame) => {
                        debug!(?frame, "synthesis socket closed");
                        return None;
                    }
                    Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                }
            }
        })
        .flat_map(stream::iter);
        Self {
            inner: Box::pin(events),
        }
    }

    /// Drain the stream and concatenate every audio chunk.
    pub async fn into_audio(mut self) -> Result<Vec<u8>> {
        let mut audio = Vec::new();
        while let Some(event) = self.next().await {
            if let SynthesisEvent::Audio(chunk) = event? {
                audio.extend_from_slice(&chunk);
            }
        }
        Ok(audio)
    }
}

impl std::fmt::Debug for SynthesisStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisStream").finish_non_exhaustive()
    }
}

impl Stream for SynthesisStream {
    type Item = Result<SynthesisEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// A rejected upgrade is a service error like any non-2xx HTTP reply; everything
/// else is a socket failure.
fn handshake_error(error: WsError, url: &url::Url) -> Error {
    match error {
        WsError::Http(response) => {
            let status = response.status();
            let body = response
                .body()
                .as_deref()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default();
            let message = extract_error_message(&body)
                .or_else(|| status.canonical_reason().map(String::from))
                .unwrap_or_else(|| "WebSocket upgrade rejected".to_string());
            let transaction_id = response
                .headers()
                .get("x-global-transaction-id")
                .or_else(|| response.headers().get("x-dp-watson-tran-id"))
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            warn!(
                status = status.as_u16(),
                transaction_id = transaction_id.as_deref().unwrap_or("-"),
                "synthesis upgrade rejected: {}",
                message
            );
            Error::remote(status.as_u16(), message, transaction_id)
        }
        other => Error::websocket_with_context(
            format!("WebSocket connection failed: {}", other),
            ErrorContext::new()
                .with_source(SERVICE_NAME)
                .with_details(url.path().to_string()),
        ),
    }
}

impl TextToSpeechV1 {
    /// Synthesize over a WebSocket, receiving audio and timing events as they are produced.
    pub async fn synthesize_using_websocket(
        &self,
        options: &SynthesizeOptions,
    ) -> Result<SynthesisStream> {
        require_non_empty(SERVICE_NAME, "text", &options.text)?;

        let mut url = self.service.url_for(&["v1", "synthesize"])?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme).map_err(|_| {
            Error::configuration_with_context(
                "service URL cannot be converted to a WebSocket URL",
                ErrorContext::new().with_details(url.to_string()),
            )
        })?;
        for (key, value) in options.query() {
            url.query_pairs_mut().append_pair(key, &value);
        }

        let mut request = url.as_str().into_client_request()?;
        if let Some(auth) = self.service.authenticator().authorization_header().await? {
            let value = HeaderValue::from_str(&auth).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid authorization header: {}", e),
                    ErrorContext::new().with_source(SERVICE_NAME),
                )
            })?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let (mut connection, _response) = connect_async(request)
            .await
            .map_err(|e| handshake_error(e, &url))?;
        info!(voice = options.voice.as_deref().unwrap_or("default"), "synthesis socket open");

        let accept = options.accept.unwrap_or_default();
        let mut payload = serde_json::json!({
            "text": options.text,
            "accept": accept.mime_type(),
        });
        if options.word_timings {
            payload["timings"] = serde_json::json!(["words"]);
        }
        connection
            .send(Message::Text(payload.to_string().into()))
            .await?;

        Ok(SynthesisStream::new(connection))
    }
}
