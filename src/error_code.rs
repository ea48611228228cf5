//! Canonical classes for failed service calls.
//!
//! Both services report failures as an HTTP status plus a JSON body. The status
//! is the only field that is stable across services, so classification is done
//! on the status alone; the body only contributes the human-readable message.
//!
//! | Category    | Classes                                                        |
//! |-------------|----------------------------------------------------------------|
//! | client      | invalid_request, authentication, permission_denied, not_found,  |
//! |             | request_too_large, unsupported_media_type                       |
//! | rate        | rate_limited                                                    |
//! | server      | server_error, overloaded, timeout                               |
//! | operational | conflict                                                        |
//! | unknown     | unknown                                                         |
//!
//! ```rust
//! use watson_lib_rust::error_code::StandardErrorCode;
//!
//! let code = StandardErrorCode::from_http_status(429);
//! assert_eq!(code.name(), "rate_limited");
//! assert!(code.retryable());
//! assert_eq!(code.category(), "rate");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardErrorCode {
    /// Malformed request, invalid parameters, or missing required fields
    InvalidRequest,
    /// Invalid, expired, or missing credentials
    Authentication,
    /// Valid credentials but insufficient permissions
    PermissionDenied,
    /// Model, voice, customization, or word does not exist
    NotFound,
    /// Payload exceeds the service limit (e.g. text longer than 5 KB for synthesis)
    RequestTooLarge,
    /// `Accept` or `Content-Type` not supported by the endpoint
    UnsupportedMediaType,
    /// Request rate limit exceeded
    RateLimited,
    /// Internal server error on the service side
    ServerError,
    /// Service temporarily unavailable
    Overloaded,
    /// Request timed out before a response was received
    Timeout,
    /// State conflict, e.g. a custom model still being trained
    Conflict,
    /// Status could not be classified
    Unknown,
}

impl StandardErrorCode {
    /// Returns the standard name (e.g., `"invalid_request"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Conflict => "conflict",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a caller may reasonably repeat the same request later.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Overloaded | Self::Timeout | Self::Conflict
        )
    }

    /// Returns the category: `"client"`, `"rate"`, `"server"`, `"operational"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound
            | Self::RequestTooLarge
            | Self::UnsupportedMediaType => "client",
            Self::RateLimited => "rate",
            Self::ServerError | Self::Overloaded | Self::Timeout => "server",
            Self::Conflict => "operational",
            Self::Unknown => "unknown",
        }
    }

    /// Maps an HTTP status code to the most likely `StandardErrorCode`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            406 | 415 => Self::UnsupportedMediaType,
            408 | 504 => Self::Timeout,
            409 => Self::Conflict,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited,
            500 | 502 => Self::ServerError,
            503 => Self::Overloaded,
            s if (400..500).contains(&s) => Self::InvalidRequest,
            s if (500..600).contains(&s) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StandardErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(StandardErrorCode::from_http_status(400), StandardErrorCode::InvalidRequest);
        assert_eq!(StandardErrorCode::from_http_status(401), StandardErrorCode::Authentication);
        assert_eq!(StandardErrorCode::from_http_status(406), StandardErrorCode::UnsupportedMediaType);
        assert_eq!(StandardErrorCode::from_http_status(409), StandardErrorCode::Conflict);
        assert_eq!(StandardErrorCode::from_http_status(422), StandardErrorCode::InvalidRequest);
        assert_eq!(StandardErrorCode::from_http_status(507), StandardErrorCode::ServerError);
        assert_eq!(StandardErrorCode::from_http_status(302), StandardErrorCode::Unknown);
    }

    #[test]
    fn test_retryable_classes() {
        for status in [408u16, 409, 429, 500, 503, 504] {
            assert!(
                StandardErrorCode::from_http_status(status).retryable(),
                "status {} should be retryable",
                status
            );
        }
        for status in [400u16, 401, 403, 404, 413, 415] {
            assert!(
                !StandardErrorCode::from_http_status(status).retryable(),
                "status {} should not be retryable",
                status
            );
        }
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(StandardErrorCode::NotFound.to_string(), "not_found");
        assert_eq!(StandardErrorCode::Overloaded.category(), "server");
    }
}
