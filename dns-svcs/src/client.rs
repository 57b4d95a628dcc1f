//! Service clients and the generic CRUD adapter
//!
//! Every endpoint of the API is one of five shapes (list, create, get,
//! update, delete) over a collection path. [`ApiClient`] implements those
//! shapes once; the resource modules only declare paths and types.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, DEFAULT_INSTANCES_URL, DEFAULT_SERVICE_URL};
use crate::error::{DnsSvcsError, Result};
use crate::http_client::HttpUtils;
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::types::{ListParams, PaginatedList, RequestOptions, parse_list};

/// A collection endpoint: its path segments and the envelope key its list holds items under.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    segments: Vec<String>,
    items_key: &'static str,
}

impl Collection {
    /// `segments` mixes literals and identifiers; identifiers must already be validated.
    pub(crate) fn new(segments: &[&str], items_key: &'static str) -> Self {
        Self {
            segments: segments.iter().map(ToString::to_string).collect(),
            items_key,
        }
    }

    pub(crate) fn path(&self) -> Vec<String> {
        self.segments.clone()
    }

    pub(crate) fn member(&self, id: &str) -> Vec<String> {
        let mut path = self.segments.clone();
        path.push(id.to_string());
        path
    }
}

/// Error body shape shared by the DNS and resource controller APIs.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

#[derive(serde::Deserialize)]
struct ApiErrorItem {
    message: Option<String>,
}

fn request_failed(status: u16, body: String) -> DnsSvcsError {
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| {
            parsed
                .message
                .or_else(|| parsed.errors.into_iter().find_map(|e| e.message))
        })
        .filter(|m| !m.is_empty());
    DnsSvcsError::RequestFailed {
        status,
        body,
        message,
    }
}

/// Transport plus the generic request/response plumbing.
#[derive(Clone)]
pub(crate) struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Execute `request` and return the body of a 2xx response.
    pub(crate) async fn fetch(&self, request: ApiRequest) -> Result<String> {
        let method = request.method.clone();
        let path = request.path.join("/");
        let response = self.transport.execute(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        let err = request_failed(response.status, response.body);
        if err.is_expected() {
            log::warn!("[dns-svcs] {method} {path}: {err}");
        } else {
            log::error!("[dns-svcs] {method} {path}: {err}");
        }
        Err(err)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.fetch(request).await?;
        HttpUtils::parse_json(&body)
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        collection: &Collection,
        params: &ListParams,
        options: &RequestOptions,
    ) -> Result<PaginatedList<T>> {
        let request = ApiRequest::new(Method::GET, collection.path())
            .paging(params)
            .options(options);
        let body = self.fetch(request).await?;
        parse_list(&body, collection.items_key)
    }

    pub(crate) async fn create<B, T>(
        &self,
        collection: &Collection,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::POST, collection.path())
            .json(body)?
            .options(options);
        self.send(request).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        collection: &Collection,
        id: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let request = ApiRequest::new(Method::GET, collection.member(id)).options(options);
        self.send(request).await
    }

    /// `method` is PUT or PATCH depending on the resource.
    pub(crate) async fn update<B, T>(
        &self,
        method: Method,
        collection: &Collection,
        id: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(method, collection.member(id))
            .json(body)?
            .options(options);
        self.send(request).await
    }

    /// DELETE answering 204 (or any 2xx whose body is ignored).
    pub(crate) async fn delete(
        &self,
        collection: &Collection,
        id: &str,
        options: &RequestOptions,
    ) -> Result<()> {
        let request = ApiRequest::new(Method::DELETE, collection.member(id)).options(options);
        self.fetch(request).await.map(drop)
    }

    /// DELETE answering 202 with the resource in its final state.
    pub(crate) async fn delete_returning<T: DeserializeOwned>(
        &self,
        collection: &Collection,
        id: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let request = ApiRequest::new(Method::DELETE, collection.member(id)).options(options);
        self.send(request).await
    }
}

/// Client for the DNS Services API: zones, resource records, permitted
/// networks and global load balancing.
#[derive(Clone)]
pub struct DnsSvcsClient {
    pub(crate) api: ApiClient,
}

impl DnsSvcsClient {
    /// HTTP client for `config`, using [`DEFAULT_SERVICE_URL`] unless overridden.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config, DEFAULT_SERVICE_URL)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            api: ApiClient { transport },
        }
    }

    /// Send an arbitrary request through the configured transport and decode
    /// the JSON response. Useful for endpoints without a typed wrapper.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        self.api.send(request).await
    }
}

impl fmt::Debug for DnsSvcsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsSvcsClient").finish_non_exhaustive()
    }
}

/// Client for the resource controller, which provisions DNS Services instances.
#[derive(Clone)]
pub struct ResourceInstancesClient {
    pub(crate) api: ApiClient,
}

impl ResourceInstancesClient {
    /// HTTP client for `config`, using [`DEFAULT_INSTANCES_URL`] unless overridden.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config, DEFAULT_INSTANCES_URL)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Reads `RESOURCE_CONTROLLER_*` variables (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env_with_prefix("RESOURCE_CONTROLLER")?)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            api: ApiClient { transport },
        }
    }
}

impl fmt::Debug for ResourceInstancesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceInstancesClient")
            .finish_non_exhaustive()
    }
}
