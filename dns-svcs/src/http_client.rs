//! HTTP execution helpers
//!
//! Shared by [`HttpTransport`](crate::HttpTransport): sending a prepared
//! `RequestBuilder`, classifying transient failures, retrying them with
//! backoff, and decoding JSON bodies.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{DnsSvcsError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text.
    ///
    /// Only transport-level conditions become errors here: connection failures,
    /// timeouts and HTTP 429. Every other status, including 4xx and the gateway
    /// statuses, is handed back to the caller with its body untouched.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[dns-svcs] {method} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DnsSvcsError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                DnsSvcsError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[dns-svcs] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[dns-svcs] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(DnsSvcsError::RateLimited {
                retry_after,
                body: Some(body),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| DnsSvcsError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[dns-svcs] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body, mapping failures to [`DnsSvcsError::ParseError`].
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[dns-svcs] JSON parse failed: {e}");
            log::error!(
                "[dns-svcs] Raw response: {}",
                truncate_for_log(response_text)
            );
            DnsSvcsError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request, retrying transient failures.
    ///
    /// # Retry strategy
    /// - `NetworkError`, `Timeout`, `RateLimited` and HTTP 502/503/504 are retried
    /// - Once retries run out a gateway response is returned as-is, so the caller
    ///   still sees its status and body
    /// - Exponential backoff: 100ms, 200ms, 400ms, 800ms, ... (maximum 10 seconds)
    /// - `Retry-After` from a 429 wins over the backoff (capped at 30 seconds)
    /// - `max_retries == 0` sends exactly once
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String)> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder can only be sent once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[dns-svcs] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method, url).await;
            };

            match Self::execute_request(req, method, url).await {
                Ok((status, _)) if attempt < max_retries && is_gateway_error(status) => {
                    let delay = backoff_delay(attempt);
                    log::warn!(
                        "[dns-svcs] {} {} got HTTP {} (attempt {}/{}), retrying in {:.1}s",
                        method,
                        url,
                        status,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[dns-svcs] {} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        method,
                        url,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DnsSvcsError::NetworkError {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// HTTP 502/503/504: the upstream may recover on its own.
fn is_gateway_error(status: u16) -> bool {
    matches!(status, 502..=504)
}

/// Use `Retry-After` (capped at 30s) when the server sent one, otherwise back off exponentially.
fn retry_delay(error: &DnsSvcsError, attempt: u32) -> Duration {
    if let DnsSvcsError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms * 2^attempt, capped at 10 seconds.
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
