//! IAM API-key authenticator with a cached access token.

use super::{validate_credential, Authenticator, AUTH_TYPE_IAM};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const TOKEN_PATH: &str = "/identity/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// One year. IAM tokens live for an hour, so anything longer is treated as this.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 3600);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
    refresh_at: Instant,
}

impl CachedToken {
    /// Refresh once 80% of the token lifetime has elapsed. Lifetimes too large
    /// for the clock are capped at [`MAX_TOKEN_LIFETIME`].
    fn new(access_token: String, expires_in: Duration) -> Self {
        let now = Instant::now();
        let lifetime = expires_in.min(MAX_TOKEN_LIFETIME);
        let expires_at = now.checked_add(lifetime).unwrap_or(now);
        let refresh_at = now.checked_add(lifetime.mul_f64(0.8)).unwrap_or(now);
        Self {
            access_token,
            expires_at,
            refresh_at,
        }
    }

    fn needs_refresh(&self) -> bool {
        let now = Instant::now();
        now >= self.refresh_at || now >= self.expires_at
    }
}

pub struct IamAuthenticator {
    http_client: reqwest::Client,
    apikey: String,
    url: String,
    client_credentials: Option<(String, String)>,
    token: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    pub fn builder() -> IamAuthenticatorBuilder {
        IamAuthenticatorBuilder::new()
    }

    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        Self::builder().apikey(apikey).build()
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), TOKEN_PATH);
        debug!(url = %endpoint, "requesting IAM access token");
        let mut request = self
            .http_client
            .post(&endpoint)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("apikey", self.apikey.as_str()),
                ("response_type", "cloud_iam"),
            ]);
        if let Some((id, secret)) = &self.client_credentials {
            request = request.basic_auth(id, Some(secret));
        }
        let response = request.send().await.map_err(|e| {
            Error::network_with_context(
                format!("IAM token request failed: {}", e),
                ErrorContext::new().with_source("iam"),
            )
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::network_with_context(
                format!("Failed to read IAM response: {}", e),
                ErrorContext::new().with_source("iam"),
            )
        })?;
        if !status.is_success() {
            return Err(Error::authentication_with_context(
                format!("IAM token request rejected ({}): {}", status, body),
                ErrorContext::new().with_source("iam").with_details(endpoint),
            ));
        }
        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        Ok(CachedToken::new(token.access_token, lifetime))
    }

    /// Returns a valid access token, fetching a new one if the cached token is due for refresh.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.needs_refresh() {
                return Ok(token.access_token.clone());
            }
        }
        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }
}

impl std::fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    async fn authorization_header(&self) -> Result<Option<String>> {
        let token = self.access_token().await?;
        Ok(Some(format!("Bearer {}", token)))
    }

    fn auth_type(&self) -> &'static str {
        AUTH_TYPE_IAM
    }
}

pub struct IamAuthenticatorBuilder {
    apikey: Option<String>,
    url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    timeout_secs: u64,
}

impl IamAuthenticatorBuilder {
    pub fn new() -> Self {
        Self {
            apikey: None,
            url: None,
            client_id: None,
            client_secret: None,
            timeout_secs: 30,
        }
    }
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = Some(apikey.into());
        self
    }
    /// Base URL of the token service; `/identity/token` is appended.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
    pub fn client_credentials(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self.client_secret = Some(secret.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<IamAuthenticator> {
        let apikey = self
            .apikey
            .ok_or_else(|| Error::configuration("IAM authenticator requires an API key"))?;
        validate_credential("apikey", &apikey)?;
        let client_credentials = match (self.client_id, self.client_secret) {
            (Some(id), Some(secret)) => Some((id, secret)),
            (None, None) => None,
            _ => {
                return Err(Error::configuration(
                    "client_id and client_secret must be set together",
                ))
            }
        };
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(IamAuthenticator {
            http_client,
            apikey,
            url: self.url.unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
            client_credentials,
            token: Mutex::new(None),
        })
    }
}

impl Default for IamAuthenticatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
