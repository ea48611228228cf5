use crate::error_code::StandardErrorCode;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parameter or configuration key that caused the error (e.g., "customization_id", "LANGUAGE_TRANSLATOR_APIKEY")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, HTTP method and URL)
    pub details: Option<String>,
    /// Source of the error (e.g., "text_to_speech", "iam")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for both service clients.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Authentication error: {message}{}", format_context(.context))]
    Authentication {
        message: String,
        context: ErrorContext,
    },

    #[error("Network error: {message}{}", format_context(.context))]
    Network {
        message: String,
        context: ErrorContext,
    },

    #[error("Remote error: HTTP {status} ({code}): {message}")]
    Remote {
        status: u16,
        code: StandardErrorCode,
        message: String,
        retryable: bool,
        transaction_id: Option<String>,
    },

    #[error("WebSocket error: {message}{}", format_context(.context))]
    WebSocket {
        message: String,
        context: ErrorContext,
    },

    #[error("Audio error: {message}")]
    Audio { message: String },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn authentication_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Authentication {
            message: msg.into(),
            context,
        }
    }

    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            context,
        }
    }

    pub fn websocket_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::WebSocket {
            message: msg.into(),
            context,
        }
    }

    /// Build a remote error from an HTTP status and the message extracted from the body.
    pub fn remote(status: u16, message: impl Into<String>, transaction_id: Option<String>) -> Self {
        let code = StandardErrorCode::from_http_status(status);
        Error::Remote {
            status,
            code,
            message: message.into(),
            retryable: code.retryable(),
            transaction_id,
        }
    }

    /// HTTP status code of a failed remote call, if this error came from the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Transport(crate::transport::TransportError::Http(e)) => {
                e.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    /// Canonical error class for remote failures; `None` for client-side errors.
    pub fn error_code(&self) -> Option<StandardErrorCode> {
        match self {
            Error::Remote { code, .. } => Some(*code),
            Error::Transport(_) if self.is_timeout() => {
                Some(StandardErrorCode::Timeout)
            }
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Remote { retryable, .. } => *retryable,
            Error::Network { .. } => true,
            Error::Transport(crate::transport::TransportError::Http(e)) => {
                e.is_timeout() || e.is_connect()
            }
            _ => false,
        }
    }

    fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(crate::transport::TransportError::Http(e)) => e.is_timeout(),
            _ => false,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Authentication { context, .. }
            | Error::Network { context, .. }
            | Error::WebSocket { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Audio {
            message: e.to_string(),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::websocket_with_context(e.to_string(), ErrorContext::new().with_source("websocket"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_classification() {
        let err = Error::remote(404, "Model not found", None);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_code(), Some(StandardErrorCode::NotFound));
        assert!(!err.is_retryable());

        let err = Error::remote(503, "Service unavailable", Some("tx-1".into()));
        assert_eq!(err.error_code(), Some(StandardErrorCode::Overloaded));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_context_is_rendered() {
        let err = Error::validation_with_context(
            "must not be empty",
            ErrorContext::new()
                .with_field_path("customization_id")
                .with_source("text_to_speech"),
        );
        let msg = err.to_string();
        assert!(msg.contains("must not be empty"));
        assert!(msg.contains("field: customization_id"));
        assert!(msg.contains("source: text_to_speech"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_remote_display() {
        let err = Error::remote(401, "Unauthorized", None);
        assert_eq!(
            err.to_string(),
            "Remote error: HTTP 401 (authentication): Unauthorized"
        );
    }
}
