//! Client configuration
//!
//! [`ClientConfig`] collects everything the HTTP transport needs: service URL,
//! credentials, retry budget and timeouts. It is built either explicitly
//! through [`ClientConfig::builder`] or from environment variables with
//! [`ClientConfig::from_env`].

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::error::{DnsSvcsError, Result};
use crate::utils::log_sanitizer::mask_secret;

/// Default endpoint of the DNS Services API.
pub const DEFAULT_SERVICE_URL: &str = "https://api.dns-svcs.cloud.ibm.com/v1";
/// Default endpoint of the resource controller (service instances).
pub const DEFAULT_INSTANCES_URL: &str = "https://resource-controller.cloud.ibm.com/v2";
/// Prefix used by [`ClientConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "DNS_SVCS";

/// 默认最大重试次数
const DEFAULT_MAX_RETRIES: u32 = 2;
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How requests are authenticated.
///
/// Obtaining a token (IAM API key exchange and friends) is left to the caller.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Authenticator {
    /// Send no `Authorization` header (mock servers, local proxies).
    #[default]
    NoAuth,
    /// Send `Authorization: Bearer <token>`.
    BearerToken(String),
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAuth => f.write_str("NoAuth"),
            Self::BearerToken(token) => f
                .debug_tuple("BearerToken")
                .field(&mask_secret(token))
                .finish(),
        }
    }
}

impl Authenticator {
    pub(crate) fn authorization(&self) -> Option<String> {
        match self {
            Self::NoAuth => None,
            Self::BearerToken(token) => Some(format!("Bearer {token}")),
        }
    }
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    service_url: Option<Url>,
    authenticator: Authenticator,
    max_retries: u32,
    connect_timeout: Duration,
    request_timeout: Duration,
    default_headers: Vec<(HeaderName, HeaderValue)>,
    user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            authenticator: Authenticator::NoAuth,
            max_retries: DEFAULT_MAX_RETRIES,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            default_headers: Vec::new(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from `DNS_SVCS_*` environment variables.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `DNS_SVCS_URL` | service URL override |
    /// | `DNS_SVCS_AUTH_TYPE` | `noauth` or `bearertoken` (inferred when unset) |
    /// | `DNS_SVCS_BEARER_TOKEN` | bearer token |
    /// | `DNS_SVCS_MAX_RETRIES` | retry budget for transient failures |
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable prefix,
    /// e.g. `INSTANCES` reads `INSTANCES_URL`, `INSTANCES_BEARER_TOKEN`, ...
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    fn from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}")).filter(|value| !value.trim().is_empty())
        };

        let mut builder = Self::builder();
        if let Some(url) = var("URL") {
            builder = builder.service_url(url);
        }

        let token = var("BEARER_TOKEN");
        let auth_type = var("AUTH_TYPE").map(|t| t.to_ascii_lowercase());
        let authenticator = match (auth_type.as_deref(), token) {
            (Some("noauth"), _) | (None, None) => Authenticator::NoAuth,
            (Some("bearertoken") | None, Some(token)) => Authenticator::BearerToken(token),
            (Some("bearertoken"), None) => {
                return Err(DnsSvcsError::InvalidConfig {
                    detail: format!(
                        "{prefix}_AUTH_TYPE is bearertoken but {prefix}_BEARER_TOKEN is not set"
                    ),
                });
            }
            (Some(other), _) => {
                return Err(DnsSvcsError::InvalidConfig {
                    detail: format!("unsupported {prefix}_AUTH_TYPE '{other}'"),
                });
            }
        };
        builder = builder.authenticator(authenticator);

        if let Some(raw) = var("MAX_RETRIES") {
            let retries = raw.trim().parse().map_err(|_| DnsSvcsError::InvalidConfig {
                detail: format!("{prefix}_MAX_RETRIES must be a non-negative integer, got '{raw}'"),
            })?;
            builder = builder.max_retries(retries);
        }

        builder.build()
    }

    /// Configured URL, or `default` when none was set.
    pub(crate) fn resolve_url(&self, default: &str) -> Result<Url> {
        match &self.service_url {
            Some(url) => Ok(url.clone()),
            None => parse_url(default),
        }
    }

    pub fn service_url(&self) -> Option<&Url> {
        self.service_url.as_ref()
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub(crate) fn default_headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.default_headers
    }

    pub(crate) fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

/// Builder for [`ClientConfig`]. All values are checked in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    service_url: Option<String>,
    authenticator: Option<Authenticator>,
    max_retries: Option<u32>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    default_headers: Vec<(String, String)>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    #[must_use]
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.authenticator(Authenticator::BearerToken(token.into()))
    }

    /// Retry budget for transient failures (default 2, 0 disables retries).
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();

        let service_url = self.service_url.as_deref().map(parse_url).transpose()?;

        let default_headers = self
            .default_headers
            .iter()
            .map(|(name, value)| {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    DnsSvcsError::InvalidConfig {
                        detail: format!("invalid header name '{name}': {e}"),
                    }
                })?;
                let value =
                    HeaderValue::from_str(value).map_err(|e| DnsSvcsError::InvalidConfig {
                        detail: format!("invalid value for header '{name}': {e}"),
                    })?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(Authenticator::BearerToken(token)) = &self.authenticator {
            if token.trim().is_empty() {
                return Err(DnsSvcsError::InvalidConfig {
                    detail: "bearer token is empty".to_string(),
                });
            }
        }

        Ok(ClientConfig {
            service_url,
            authenticator: self.authenticator.unwrap_or(defaults.authenticator),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            default_headers,
            user_agent: self.user_agent,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| DnsSvcsError::InvalidConfig {
        detail: format!("invalid service URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(DnsSvcsError::InvalidConfig {
            detail: format!("service URL '{raw}' must be an absolute http(s) URL"),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let res = ClientConfig::builder().build();
        assert!(res.is_ok(), "build failed: {res:?}");
        let Ok(config) = res else { return };
        assert!(config.service_url().is_none());
        assert_eq!(config.authenticator(), &Authenticator::NoAuth);
        assert_eq!(config.max_retries(), 2);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn resolve_url_prefers_configured() {
        let res = ClientConfig::builder()
            .service_url("http://127.0.0.1:8080/v1")
            .build();
        assert!(res.is_ok(), "build failed: {res:?}");
        let Ok(config) = res else { return };
        let url = config.resolve_url(DEFAULT_SERVICE_URL);
        assert_eq!(
            url.map(|u| u.to_string()).ok().as_deref(),
            Some("http://127.0.0.1:8080/v1")
        );

        let fallback = ClientConfig::default().resolve_url(DEFAULT_INSTANCES_URL);
        assert_eq!(
            fallback.map(|u| u.to_string()).ok().as_deref(),
            Some(DEFAULT_INSTANCES_URL)
        );
    }

    #[test]
    fn rejects_bad_url() {
        for raw in ["not a url", "ftp://example.com", "mailto:dns@example.com"] {
            let res = ClientConfig::builder().service_url(raw).build();
            assert!(
                matches!(res, Err(DnsSvcsError::InvalidConfig { .. })),
                "{raw} accepted: {res:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_header() {
        let res = ClientConfig::builder()
            .default_header("bad header", "x")
            .build();
        assert!(matches!(res, Err(DnsSvcsError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_empty_token() {
        let res = ClientConfig::builder().bearer_token("  ").build();
        assert!(matches!(res, Err(DnsSvcsError::InvalidConfig { .. })));
    }

    #[test]
    fn debug_masks_token() {
        let auth = Authenticator::BearerToken("eyJhbGciOiJSUzI1NiJ9.secret".to_string());
        let debug = format!("{auth:?}");
        assert!(!debug.contains("secret"), "token leaked: {debug}");
        assert!(debug.contains("eyJh****"));
    }

    #[test]
    fn env_infers_bearer_token() {
        let res = ClientConfig::from_lookup(
            "DNS_SVCS",
            lookup(&[
                ("DNS_SVCS_URL", "https://api.private.dns-svcs.cloud.ibm.com/v1"),
                ("DNS_SVCS_BEARER_TOKEN", "token-value-123"),
                ("DNS_SVCS_MAX_RETRIES", "5"),
            ]),
        );
        assert!(res.is_ok(), "from_lookup failed: {res:?}");
        let Ok(config) = res else { return };
        assert_eq!(
            config.authenticator(),
            &Authenticator::BearerToken("token-value-123".to_string())
        );
        assert_eq!(config.max_retries(), 5);
        assert_eq!(
            config.service_url().map(Url::as_str),
            Some("https://api.private.dns-svcs.cloud.ibm.com/v1")
        );
    }

    #[test]
    fn env_noauth_ignores_token() {
        let res = ClientConfig::from_lookup(
            "DNS_SVCS",
            lookup(&[
                ("DNS_SVCS_AUTH_TYPE", "NOAUTH"),
                ("DNS_SVCS_BEARER_TOKEN", "token-value-123"),
            ]),
        );
        assert!(matches!(
            res.as_ref().map(ClientConfig::authenticator),
            Ok(Authenticator::NoAuth)
        ));
    }

    #[test]
    fn env_errors() {
        let missing_token =
            ClientConfig::from_lookup("X", lookup(&[("X_AUTH_TYPE", "bearertoken")]));
        assert!(matches!(missing_token, Err(DnsSvcsError::InvalidConfig { .. })));

        let unknown = ClientConfig::from_lookup("X", lookup(&[("X_AUTH_TYPE", "iam")]));
        assert!(matches!(unknown, Err(DnsSvcsError::InvalidConfig { .. })));

        let retries = ClientConfig::from_lookup("X", lookup(&[("X_MAX_RETRIES", "-1")]));
        assert!(matches!(retries, Err(DnsSvcsError::InvalidConfig { .. })));
    }
}
