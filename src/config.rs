//! Service configuration from the environment.
//!
//! Credentials follow the `<SERVICE>_<KEY>` convention, where `<SERVICE>` is the
//! upper-cased service name (`language_translator` → `LANGUAGE_TRANSLATOR`):
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `<SERVICE>_URL` | service endpoint |
//! | `<SERVICE>_AUTH_TYPE` | `iam`, `basic`, `bearerToken` or `noAuth` |
//! | `<SERVICE>_APIKEY` | IAM API key |
//! | `<SERVICE>_AUTH_URL` | IAM token service URL |
//! | `<SERVICE>_USERNAME` / `<SERVICE>_PASSWORD` | basic auth |
//! | `<SERVICE>_BEARER_TOKEN` | caller-managed token |
//!
//! Transport knobs shared by every client:
//! - `WATSON_HTTP_TIMEOUT_SECS` (default 60)
//! - `WATSON_PROXY_URL`

use crate::auth::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator, AUTH_TYPE_BASIC, AUTH_TYPE_BEARER_TOKEN, AUTH_TYPE_IAM, AUTH_TYPE_NO_AUTH,
};
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub service_name: String,
    pub url: Option<String>,
    pub auth_type: Option<String>,
    pub apikey: Option<String>,
    pub auth_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
}

impl ServiceConfig {
    /// Read `<SERVICE>_*` variables from the process environment.
    pub fn from_env(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] but reads from an arbitrary key/value source.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let get = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix)).filter(|v| !v.trim().is_empty())
        };
        Self {
            service_name: service_name.to_string(),
            url: get("URL"),
            auth_type: get("AUTH_TYPE"),
            apikey: get("APIKEY"),
            auth_url: get("AUTH_URL"),
            username: get("USERNAME"),
            password: get("PASSWORD"),
            bearer_token: get("BEARER_TOKEN"),
        }
    }

    pub fn from_map(service_name: &str, vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(service_name, |key| vars.get(key).cloned())
    }

    /// True when enough credentials are present to build an authenticator.
    pub fn has_credentials(&self) -> bool {
        self.resolved_auth_type().is_some()
    }

    /// Explicit `AUTH_TYPE`, or the scheme implied by which credentials are set.
    pub fn resolved_auth_type(&self) -> Option<&'static str> {
        if let Some(explicit) = &self.auth_type {
            return match explicit.to_lowercase().as_str() {
                "iam" => Some(AUTH_TYPE_IAM),
                "basic" => Some(AUTH_TYPE_BASIC),
                "bearertoken" => Some(AUTH_TYPE_BEARER_TOKEN),
                "noauth" => Some(AUTH_TYPE_NO_AUTH),
                _ => None,
            };
        }
        if self.apikey.is_some() {
            Some(AUTH_TYPE_IAM)
        } else if self.username.as_deref() == Some("apikey") && self.password.is_some() {
            Some(AUTH_TYPE_IAM)
        } else if self.username.is_some() && self.password.is_some() {
            Some(AUTH_TYPE_BASIC)
        } else if self.bearer_token.is_some() {
            Some(AUTH_TYPE_BEARER_TOKEN)
        } else {
            None
        }
    }

    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>> {
        let ctx = |field: &str| {
            ErrorContext::new()
                .with_field_path(format!("{}_{}", self.service_name.to_uppercase(), field))
                .with_source("config")
        };
        let auth_type = self.resolved_auth_type().ok_or_else(|| {
            Error::configuration_with_context(
                format!(
                    "no usable credentials for service '{}' (auth type: {})",
                    self.service_name,
                    self.auth_type.as_deref().unwrap_or("unset")
                ),
                ctx("AUTH_TYPE"),
            )
        })?;
        let missing = |field: &str| {
            Error::configuration_with_context(format!("{} is required for {} auth", field, auth_type), ctx(field))
        };

        let authenticator: Arc<dyn Authenticator> = match auth_type {
            AUTH_TYPE_IAM => {
                // `apikey` as username carries the API key in the password slot.
                let apikey = self
                    .apikey
                    .clone()
                    .or_else(|| {
                        (self.username.as_deref() == Some("apikey"))
                            .then(|| self.password.clone())
                            .flatten()
                    })
                    .ok_or_else(|| missing("APIKEY"))?;
                let mut builder = IamAuthenticator::builder().apikey(apikey);
                if let Some(url) = &self.auth_url {
                    builder = builder.url(url.clone());
                }
                Arc::new(builder.build()?)
            }
            AUTH_TYPE_BASIC => {
                let username = self.username.as_deref().ok_or_else(|| missing("USERNAME"))?;
                let password = self.password.as_deref().ok_or_else(|| missing("PASSWORD"))?;
                Arc::new(BasicAuthenticator::new(username, password)?)
            }
            AUTH_TYPE_BEARER_TOKEN => {
                let token = self.bearer_token.clone().ok_or_else(|| missing("BEARER_TOKEN"))?;
                Arc::new(BearerTokenAuthenticator::new(token)?)
            }
            _ => Arc::new(NoAuthAuthenticator),
        };
        Ok(authenticator)
    }
}

/// HTTP timeout from `WATSON_HTTP_TIMEOUT_SECS`, falling back to [`DEFAULT_TIMEOUT_SECS`].
pub fn http_timeout_secs() -> u64 {
    env::var("WATSON_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

pub fn proxy_url() -> Option<String> {
    env::var("WATSON_PROXY_URL").ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let cfg = ServiceConfig::from_map(
            "text_to_speech",
            &vars(&[
                ("TEXT_TO_SPEECH_URL", "https://tts.example.com"),
                ("TEXT_TO_SPEECH_APIKEY", "k"),
                ("LANGUAGE_TRANSLATOR_APIKEY", "other"),
            ]),
        );
        assert_eq!(cfg.url.as_deref(), Some("https://tts.example.com"));
        assert_eq!(cfg.apikey.as_deref(), Some("k"));
        assert_eq!(cfg.resolved_auth_type(), Some("iam"));
    }

    #[test]
    fn test_infers_auth_type() {
        let basic = ServiceConfig::from_map(
            "svc",
            &vars(&[("SVC_USERNAME", "u"), ("SVC_PASSWORD", "p")]),
        );
        assert_eq!(basic.resolved_auth_type(), Some("basic"));

        let apikey_user = ServiceConfig::from_map(
            "svc",
            &vars(&[("SVC_USERNAME", "apikey"), ("SVC_PASSWORD", "p")]),
        );
        assert_eq!(apikey_user.resolved_auth_type(), Some("iam"));
        assert_eq!(apikey_user.authenticator().unwrap().auth_type(), "iam");

        let bearer = ServiceConfig::from_map("svc", &vars(&[("SVC_BEARER_TOKEN", "t")]));
        assert_eq!(bearer.resolved_auth_type(), Some("bearerToken"));
        let header = tokio_test::block_on(bearer.authenticator().unwrap().authorization_header());
        assert_eq!(header.unwrap().as_deref(), Some("Bearer t"));

        let empty = ServiceConfig::from_map("svc", &vars(&[("SVC_APIKEY", "  ")]));
        assert!(!empty.has_credentials());
        assert!(empty.authenticator().is_err());
    }

    #[test]
    fn test_explicit_auth_type_is_case_insensitive() {
        let cfg = ServiceConfig::from_map("svc", &vars(&[("SVC_AUTH_TYPE", "NOAUTH")]));
        assert_eq!(cfg.authenticator().unwrap().auth_type(), "noAuth");

        let cfg = ServiceConfig::from_map("svc", &vars(&[("SVC_AUTH_TYPE", "basic")]));
        let err = cfg.authenticator().err().expect("expected an error");
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("SVC_USERNAME")
        );
    }
}
