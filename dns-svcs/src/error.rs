use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all DNS Services client operations.
///
/// Local failures (option validation, rdata discrimination) are produced before
/// or after the network call and never reach the transport. Transport failures
/// keep the HTTP status and the raw response body for caller inspection.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): connection failures
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): HTTP 429
///
/// [`HttpTransport`](crate::HttpTransport) retries these with exponential backoff.
/// It also retries HTTP 502/503/504 responses; if those persist they surface as
/// [`RequestFailed`](Self::RequestFailed) with the status and body intact.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DnsSvcsError {
    /// A required field was missing or malformed before any request left the client.
    #[error("Invalid field '{field}': {detail}")]
    Validation {
        /// Name of the offending field (wire name).
        field: String,
        /// What is wrong with it.
        detail: String,
    },

    /// The record `type` and the attached rdata variant disagree.
    #[error("Record type {record_type} does not accept {rdata_type} rdata")]
    TypeRdataMismatch {
        /// Type chosen on the options.
        record_type: String,
        /// Type implied by the attached rdata.
        rdata_type: String,
    },

    /// An incoming `rdata` object matched none of the known field signatures.
    #[error("Unrecognized rdata shape: {raw}")]
    UnrecognizedRdataShape {
        /// The raw JSON object, kept for diagnostics.
        raw: String,
    },

    /// An incoming `rdata` field holds a value of the wrong scalar kind or range.
    #[error("Rdata field '{field}' is not {expected}")]
    TypeMismatch {
        /// Name of the offending field.
        field: String,
        /// Description of the expected value.
        expected: String,
    },

    /// The API answered with a non-2xx status.
    #[error("{}", request_failed_message(*status, message.as_deref()))]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
        /// Error message extracted from the body, if it had the usual error shape.
        message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("{}", rate_limited_message(*retry_after))]
    RateLimited {
        /// Suggested wait time in seconds, from the `Retry-After` header.
        retry_after: Option<u64>,
        /// Response body, verbatim.
        body: Option<String>,
    },

    /// A network-level error occurred (connection refused, reset, DNS failure).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// Failed to decode a response body.
    #[error("Parse error: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("Serialization error: {detail}")]
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// Client configuration is unusable (bad URL, bad environment value).
    #[error("Invalid configuration: {detail}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        detail: String,
    },
}

fn request_failed_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(msg) => format!("Request failed (HTTP {status}): {msg}"),
        None => format!("Request failed (HTTP {status})"),
    }
}

fn rate_limited_message(retry_after: Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("Rate limited (retry after {secs}s)"),
        None => "Rate limited".to_string(),
    }
}

impl DnsSvcsError {
    pub(crate) fn validation(field: &str, detail: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::validation(field, "is required")
    }

    pub(crate) fn type_mismatch(field: &str, expected: &str) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    /// HTTP status of the failed request, for variants that carry one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// 是否为预期行为（调用方输入错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::TypeRdataMismatch { .. }
            | Self::InvalidConfig { .. } => true,
            Self::RequestFailed { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Whether the failure is transient and the same request may succeed later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Convenience type alias for `Result<T, DnsSvcsError>`.
pub type Result<T> = std::result::Result<T, DnsSvcsError>;
