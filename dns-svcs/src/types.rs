//! Shared request/response types
//!
//! Per-call options ([`RequestOptions`], [`ListParams`]) and the list
//! envelope every collection endpoint answers with ([`PaginatedList`]).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DnsSvcsError, Result};
use crate::http_client::HttpUtils;

/// Header carrying the caller's correlation id.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

// ============ Request Options ============

/// Per-request extras shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as `X-Correlation-ID`; echoed by the server for tracing.
    pub correlation_id: Option<String>,
    /// Additional headers for this request only.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Opaque offset/limit paging for list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Parameters for the page following `page`, if there is one.
    pub fn next_after<T>(page: &PaginatedList<T>) -> Option<Self> {
        if !page.has_more() {
            return None;
        }
        let fetched = u32::try_from(page.items.len()).unwrap_or(u32::MAX);
        Some(Self {
            offset: Some(page.offset.saturating_add(fetched)),
            limit: Some(page.limit),
        })
    }
}

// ============ Response Envelope ============

/// `{"href": "..."}` link used by list envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub offset: u32,
    pub limit: u32,
    /// Number of items on this page as reported by the server.
    pub count: Option<u32>,
    pub total_count: Option<u32>,
    pub first: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl<T> PaginatedList<T> {
    /// Whether another page exists after this one.
    pub fn has_more(&self) -> bool {
        if self.next.is_some() {
            return true;
        }
        let seen = u64::from(self.offset) + self.items.len() as u64;
        match self.total_count {
            Some(total) => !self.items.is_empty() && seen < u64::from(total),
            None => false,
        }
    }

    pub(crate) fn try_map<U>(self, f: impl FnMut(T) -> Result<U>) -> Result<PaginatedList<U>> {
        Ok(PaginatedList {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>>>()?,
            offset: self.offset,
            limit: self.limit,
            count: self.count,
            total_count: self.total_count,
            first: self.first,
            next: self.next,
        })
    }
}

#[derive(Deserialize)]
struct PageMeta {
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    limit: u32,
    count: Option<u32>,
    total_count: Option<u32>,
    first: Option<PageLink>,
    next: Option<PageLink>,
}

/// Decode a list envelope whose items live under `items_key`.
pub(crate) fn parse_list<T: DeserializeOwned>(
    body: &str,
    items_key: &str,
) -> Result<PaginatedList<T>> {
    let mut envelope: Map<String, Value> = HttpUtils::parse_json(body)?;
    let items = match envelope.remove(items_key) {
        None | Some(Value::Null) => Vec::new(),
        Some(items) => serde_json::from_value(items).map_err(|e| DnsSvcsError::ParseError {
            detail: format!("invalid '{items_key}': {e}"),
        })?,
    };
    let meta: PageMeta =
        serde_json::from_value(Value::Object(envelope)).map_err(|e| DnsSvcsError::ParseError {
            detail: format!("invalid list envelope: {e}"),
        })?;

    Ok(PaginatedList {
        items,
        offset: meta.offset,
        limit: meta.limit,
        count: meta.count,
        total_count: meta.total_count,
        first: meta.first,
        next: meta.next,
    })
}

/// Path identifiers must be present before a URL is built.
pub(crate) fn require_id(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DnsSvcsError::missing(field));
    }
    Ok(())
}

pub(crate) fn require_text(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(DnsSvcsError::missing(field)),
    }
}
