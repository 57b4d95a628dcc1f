//! Transport adapter
//!
//! The client never talks to reqwest directly: every call is expressed as an
//! [`ApiRequest`] and handed to a [`Transport`]. [`HttpTransport`] is the
//! production implementation; tests and callers with special needs (custom
//! auth, recording proxies) can plug in their own.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{DnsSvcsError, Result};
use crate::http_client::HttpUtils;
use crate::types::{CORRELATION_ID_HEADER, ListParams, RequestOptions};
use crate::utils::log_sanitizer::truncate_for_log;

const JSON_MIME: &str = "application/json";

/// One API call, independent of the HTTP stack that will execute it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below the service URL, unencoded.
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn paging(self, params: &ListParams) -> Self {
        self.query_opt("offset", params.offset)
            .query_opt("limit", params.limit)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Apply correlation id and extra headers from `options`.
    #[must_use]
    pub fn options(mut self, options: &RequestOptions) -> Self {
        if let Some(id) = &options.correlation_id {
            self = self.header(CORRELATION_ID_HEADER, id.clone());
        }
        self.headers.extend(options.headers.iter().cloned());
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| DnsSvcsError::SerializationError {
            detail: e.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Raw outcome of an executed request. Non-2xx statuses are not errors at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes [`ApiRequest`]s. Implementations own base URL resolution, auth,
/// timeouts and retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    authorization: Option<String>,
    max_retries: u32,
}

impl HttpTransport {
    /// Build a transport from `config`, falling back to `default_url` when the
    /// config carries no service URL.
    pub fn new(config: &ClientConfig, default_url: &str) -> Result<Self> {
        let base_url = config.resolve_url(default_url)?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.default_headers() {
            headers.append(name.clone(), value.clone());
        }

        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .default_headers(headers);
        if let Some(agent) = config.user_agent() {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(|e| DnsSvcsError::InvalidConfig {
            detail: format!("failed to create HTTP client: {e}"),
        })?;

        log::debug!(
            "[dns-svcs] transport for {base_url} ({:?}, max_retries={})",
            config.authenticator(),
            config.max_retries()
        );

        Ok(Self {
            client,
            base_url,
            authorization: config.authenticator().authorization(),
            max_retries: config.max_retries(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of `segments` below the base URL, each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DnsSvcsError::InvalidConfig {
                detail: format!("{} cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, JSON_MIME);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = &self.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            let payload =
                serde_json::to_string(body).map_err(|e| DnsSvcsError::SerializationError {
                    detail: e.to_string(),
                })?;
            log::debug!("[dns-svcs] Request Body: {}", truncate_for_log(&payload));
            builder = builder.header(CONTENT_TYPE, JSON_MIME).body(payload);
        }

        let (status, body) = HttpUtils::execute_request_with_retry(
            builder,
            request.method.as_str(),
            url.as_str(),
            self.max_retries,
        )
        .await?;

        Ok(ApiResponse { status, body })
    }
}
