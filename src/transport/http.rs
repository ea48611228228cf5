use super::{DetailedResponse, TransportError};
use crate::auth::{Authenticator, IamAuthenticator};
use crate::config::{self, ServiceConfig};
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, Proxy, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared request pipeline: URL building, authentication, sending and error mapping.
pub struct BaseService {
    http_client: reqwest::Client,
    service_name: &'static str,
    service_url: Url,
    version: Option<String>,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
}

impl BaseService {
    pub fn builder(service_name: &'static str) -> BaseServiceBuilder {
        BaseServiceBuilder::new(service_name)
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Service URL with `segments` appended as percent-encoded path segments.
    ///
    /// Segments are encoded individually, so a word such as `"a/b c"` stays one segment.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.service_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::configuration_with_context(
                    "service URL cannot be a base",
                    ErrorContext::new().with_details(self.service_url.to_string()),
                )
            })?;
            path.pop_if_empty().extend(segments);
        }
        if let Some(version) = &self.version {
            url.query_pairs_mut().append_pair("version", version);
        }
        Ok(url)
    }

    /// Start an authenticated request to `segments`.
    pub async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url_for(segments)?;
        let mut request = self
            .http_client
            .request(method, url)
            .headers(self.default_headers.clone())
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string());
        if let Some(auth) = self.authenticator.authorization_header().await? {
            request = request.header(AUTHORIZATION, auth);
        }
        Ok(request)
    }

    /// Send the request and turn non-2xx statuses into [`Error::Remote`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build().map_err(TransportError::Http)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(service = self.service_name, %method, %url, "sending request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(TransportError::Http)?;
        let status = response.status();
        debug!(service = self.service_name, %method, %url, status = status.as_u16(), "received response");
        if status.is_success() {
            return Ok(response);
        }

        let transaction_id = response
            .headers()
            .get("x-global-transaction-id")
            .or_else(|| response.headers().get("x-dp-watson-tran-id"))
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_else(|| "unknown error".to_string());
        warn!(
            service = self.service_name,
            %method,
            %url,
            status = status.as_u16(),
            transaction_id = transaction_id.as_deref().unwrap_or("-"),
            "request failed: {}",
            message
        );
        Err(Error::remote(status.as_u16(), message, transaction_id))
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<T>> {
        let response = self.send(request.header("Accept", "application/json")).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::Http)?;
        let result = serde_json::from_slice(&body)?;
        Ok(DetailedResponse::new(result, status, headers))
    }

    pub async fn send_bytes(&self, request: RequestBuilder) -> Result<DetailedResponse<Bytes>> {
        let response = self.send(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::Http)?;
        Ok(DetailedResponse::new(body, status, headers))
    }

    /// Body streamed chunk by chunk instead of buffered.
    pub async fn send_stream(
        &self,
        request: RequestBuilder,
    ) -> Result<DetailedResponse<BoxStream<'static, Bytes>>> {
        let response = self.send(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let stream = response
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(DetailedResponse::new(Box::pin(stream), status, headers))
    }

    /// For endpoints whose success body carries nothing useful.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<DetailedResponse<()>> {
        let response = self.send(request).await?;
        Ok(DetailedResponse::new(
            (),
            response.status(),
            response.headers().clone(),
        ))
    }
}

impl std::fmt::Debug for BaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseService")
            .field("service_name", &self.service_name)
            .field("service_url", &self.service_url.as_str())
            .field("version", &self.version)
            .field("auth_type", &self.authenticator.auth_type())
            .finish()
    }
}

/// First error message found in a JSON error body.
///
/// The services are not consistent: translator errors use `error`, synthesis
/// errors use `error` + `code_description`, IAM uses `errorMessage`, and
/// gateway errors nest `error.message`.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let as_text = |v: &serde_json::Value| v.as_str().map(String::from);
    json.get("error")
        .and_then(|e| as_text(e).or_else(|| e.get("message").and_then(as_text)))
        .or_else(|| json.get("message").and_then(as_text))
        .or_else(|| json.get("errorMessage").and_then(as_text))
        .or_else(|| json.get("code_description").and_then(as_text))
        .or_else(|| {
            json.get("errors")
                .and_then(|e| e.get(0))
                .and_then(|e| e.get("message"))
                .and_then(as_text)
        })
}

pub struct BaseServiceBuilder {
    service_name: &'static str,
    service_url: Option<String>,
    default_url: Option<&'static str>,
    version: Option<String>,
    authenticator: Option<Arc<dyn Authenticator>>,
    apikey: Option<String>,
    iam_url: Option<String>,
    config: Option<ServiceConfig>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    headers: HeaderMap,
}

impl BaseServiceBuilder {
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            service_url: None,
            default_url: None,
            version: None,
            authenticator: None,
            apikey: None,
            iam_url: None,
            config: None,
            timeout_secs: None,
            user_agent: None,
            headers: HeaderMap::new(),
        }
    }
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }
    pub fn default_url(mut self, url: &'static str) -> Self {
        self.default_url = Some(url);
        self
    }
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }
    /// Shorthand for an [`IamAuthenticator`] with this API key.
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = Some(apikey.into());
        self
    }
    pub fn iam_url(mut self, url: impl Into<String>) -> Self {
        self.iam_url = Some(url.into());
        self
    }
    /// Use this configuration instead of reading `<SERVICE>_*` from the environment.
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = Some(config);
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
    /// Header sent with every request of this service.
    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid header value: {}", e),
                ErrorContext::new().with_field_path(name),
            )
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Explicit settings win; anything unset falls back to the service's environment
    /// configuration and finally to the default URL.
    pub fn build(self) -> Result<BaseService> {
        let service_name = self.service_name;
        let config = self
            .config
            .unwrap_or_else(|| ServiceConfig::from_env(service_name));

        let raw_url = self
            .service_url
            .or_else(|| config.url.clone())
            .or_else(|| self.default_url.map(String::from))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "service URL must be specified",
                    ErrorContext::new().with_source(service_name),
                )
            })?;
        let service_url = Url::parse(raw_url.trim_end_matches('/')).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid service URL '{}': {}", raw_url, e),
                ErrorContext::new().with_source(service_name),
            )
        })?;

        let authenticator: Arc<dyn Authenticator> = match (self.authenticator, self.apikey) {
            (Some(authenticator), _) => authenticator,
            (None, Some(apikey)) => {
                let mut iam = IamAuthenticator::builder().apikey(apikey);
                if let Some(url) = self.iam_url.or_else(|| config.auth_url.clone()) {
                    iam = iam.url(url);
                }
                Arc::new(iam.build()?)
            }
            (None, None) => config.authenticator()?,
        };

        let mut default_headers = self.headers;
        let user_agent = self.user_agent.unwrap_or_else(|| {
            format!("watson-lib-rust/{}", env!("CARGO_PKG_VERSION"))
        });
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|e| Error::configuration(format!("invalid user agent: {}", e)))?,
        );

        let timeout = self.timeout_secs.unwrap_or_else(config::http_timeout_secs);
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .pool_idle_timeout(Some(Duration::from_secs(90)));
        if let Some(proxy_url) = config::proxy_url() {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(BaseService {
            http_client,
            service_name,
            service_url,
            version: self.version,
            authenticator,
            default_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BearerTokenAuthenticator, NoAuthAuthenticator};

    fn service(url: &str, version: Option<&str>) -> BaseService {
        let mut builder = BaseService::builder("test_service")
            .service_url(url)
            .authenticator(Arc::new(NoAuthAuthenticator));
        if let Some(v) = version {
            builder = builder.version(v);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_url_for_encodes_segments_and_appends_version() {
        let svc = service("https://api.example.com/instances/abc/", Some("2018-05-01"));
        let url = svc
            .url_for(&["v1", "customizations", "id-1", "words", "N C/AA"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/instances/abc/v1/customizations/id-1/words/N%20C%2FAA?version=2018-05-01"
        );

        let svc = service("https://api.example.com", None);
        assert_eq!(
            svc.url_for(&["v1", "voices"]).unwrap().as_str(),
            "https://api.example.com/v1/voices"
        );
    }

    #[test]
    fn test_builder_errors() {
        let empty = || ServiceConfig::from_lookup("test_service", |_| None);
        assert!(BaseService::builder("test_service")
            .config(empty())
            .authenticator(Arc::new(NoAuthAuthenticator))
            .build()
            .is_err());
        assert!(BaseService::builder("test_service")
            .config(empty())
            .service_url("not a url")
            .authenticator(Arc::new(NoAuthAuthenticator))
            .build()
            .is_err());
        assert!(BaseService::builder("test_service")
            .config(empty())
            .service_url("https://api.example.com")
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_falls_back_to_config() {
        let config = ServiceConfig::from_lookup("test_service", |key| match key {
            "TEST_SERVICE_URL" => Some("https://configured.example.com".to_string()),
            "TEST_SERVICE_BEARER_TOKEN" => Some("tok".to_string()),
            _ => None,
        });
        let svc = BaseService::builder("test_service")
            .config(config.clone())
            .default_url("https://default.example.com")
            .build()
            .unwrap();
        assert_eq!(svc.service_url().as_str(), "https://configured.example.com/");
        assert_eq!(svc.authenticator().auth_type(), "bearerToken");

        let svc = BaseService::builder("test_service")
            .config(config)
            .service_url("https://explicit.example.com")
            .apikey("k")
            .build()
            .unwrap();
        assert_eq!(svc.service_url().as_str(), "https://explicit.example.com/");
        assert_eq!(svc.authenticator().auth_type(), "iam");
    }

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(r#"{"code":404,"error":"Model not found"}"#).as_deref(),
            Some("Model not found")
        );
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"nested"}}"#).as_deref(),
            Some("nested")
        );
        assert_eq!(
            extract_error_message(r#"{"errorMessage":"iam says no"}"#).as_deref(),
            Some("iam says no")
        );
        assert_eq!(
            extract_error_message(r#"{"code":400,"code_description":"Bad Request"}"#).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(
            extract_error_message(r#"{"errors":[{"code":"x","message":"first"}]}"#).as_deref(),
            Some("first")
        );
        assert_eq!(extract_error_message("<html>gateway</html>"), None);
    }

    #[tokio::test]
    async fn test_request_carries_auth_and_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/ping")
            .match_header("authorization", "Bearer t0k")
            .match_header("user-agent", mockito::Matcher::Regex("^watson-lib-rust/".into()))
            .match_header("x-request-id", mockito::Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let svc = BaseService::builder("test_service")
            .service_url(server.url())
            .authenticator(Arc::new(BearerTokenAuthenticator::new("t0k").unwrap()))
            .build()
            .unwrap();
        let request = svc.request(Method::GET, &["v1", "ping"]).await.unwrap();
        let response: DetailedResponse<serde_json::Value> = svc.send_json(request).await.unwrap();
        assert_eq!(response.status.as_u16(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_maps_to_remote_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/missing")
            .with_status(404)
            .with_header("x-global-transaction-id", "tx-42")
            .with_body(r#"{"code":404,"error":"Not Found"}"#)
            .create_async()
            .await;

        let svc = service(&server.url(), None);
        let request = svc.request(Method::GET, &["v1", "missing"]).await.unwrap();
        let err = svc.send_empty(request).await.unwrap_err();
        match err {
            Error::Remote {
                status,
                message,
                transaction_id,
                ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
                assert_eq!(transaction_id.as_deref(), Some("tx-42"));
            }
            other => panic!("expected remote error, got {:?}", other),
        }
    }
}
