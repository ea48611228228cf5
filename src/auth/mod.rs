//! Request authentication.
//!
//! Every service call asks its [`Authenticator`] for an `Authorization` header
//! value right before the request is sent, so token-based schemes can refresh
//! transparently. The WebSocket handshake uses the same header.

mod iam;

pub use iam::{IamAuthenticator, IamAuthenticatorBuilder, DEFAULT_IAM_URL};

use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const AUTH_TYPE_NO_AUTH: &str = "noAuth";
pub const AUTH_TYPE_BASIC: &str = "basic";
pub const AUTH_TYPE_BEARER_TOKEN: &str = "bearerToken";
pub const AUTH_TYPE_IAM: &str = "iam";

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Value for the `Authorization` header, or `None` to send the request unauthenticated.
    async fn authorization_header(&self) -> Result<Option<String>>;

    /// Short name of the scheme (`iam`, `basic`, `bearerToken`, `noAuth`).
    fn auth_type(&self) -> &'static str;
}

/// Sends requests without credentials (local mocks, pre-authenticated proxies).
#[derive(Debug, Default, Clone)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    async fn authorization_header(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn auth_type(&self) -> &'static str {
        AUTH_TYPE_NO_AUTH
    }
}

#[derive(Clone)]
pub struct BasicAuthenticator {
    header: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Result<Self> {
        let username = username.as_ref();
        let password = password.as_ref();
        validate_credential("username", username)?;
        validate_credential("password", password)?;
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        Ok(Self {
            header: format!("Basic {}", encoded),
        })
    }
}

impl std::fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authorization_header(&self) -> Result<Option<String>> {
        Ok(Some(self.header.clone()))
    }

    fn auth_type(&self) -> &'static str {
        AUTH_TYPE_BASIC
    }
}

/// Sends a caller-managed access token. The caller is responsible for refreshing it.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        validate_credential("bearer_token", &token)?;
        Ok(Self { token })
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authorization_header(&self) -> Result<Option<String>> {
        Ok(Some(format!("Bearer {}", self.token)))
    }

    fn auth_type(&self) -> &'static str {
        AUTH_TYPE_BEARER_TOKEN
    }
}

/// Rejects empty values and values still wrapped in template braces or quotes,
/// which usually means a credentials file was copied without being filled in.
pub(crate) fn validate_credential(field: &str, value: &str) -> Result<()> {
    let ctx = || {
        ErrorContext::new()
            .with_field_path(field)
            .with_source("authenticator")
    };
    if value.trim().is_empty() {
        return Err(Error::configuration_with_context(
            format!("{} must not be empty", field),
            ctx(),
        ));
    }
    let wrapped = |open: char, close: char| value.starts_with(open) && value.ends_with(close);
    if wrapped('{', '}') || wrapped('"', '"') {
        return Err(Error::configuration_with_context(
            format!("{} must not be wrapped in braces or quotes", field),
            ctx(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_header() {
        let auth = BasicAuthenticator::new("apikey", "secret").unwrap();
        let header = auth.authorization_header().await.unwrap();
        assert_eq!(header.as_deref(), Some("Basic YXBpa2V5OnNlY3JldA=="));
        assert_eq!(auth.auth_type(), "basic");
    }

    #[tokio::test]
    async fn test_bearer_and_noauth() {
        let auth = BearerTokenAuthenticator::new("tok").unwrap();
        assert_eq!(
            auth.authorization_header().await.unwrap().as_deref(),
            Some("Bearer tok")
        );
        assert!(NoAuthAuthenticator.authorization_header().await.unwrap().is_none());
    }

    #[test]
    fn test_rejects_placeholder_credentials() {
        assert!(BasicAuthenticator::new("", "pw").is_err());
        assert!(BasicAuthenticator::new("{username}", "pw").is_err());
        assert!(BearerTokenAuthenticator::new("\"token\"").is_err());
        let err = BearerTokenAuthenticator::new("   ").unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("bearer_token")
        );
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let auth = BasicAuthenticator::new("user", "hunter2").unwrap();
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
