//! `reqwest`-backed [`JsonFetcher`].
//!
//! - Token-bucket rate limiting shared by every upstream via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - Per-request timeout from configuration.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use randomedia_core::{Error, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::{error_envelope, Auth, JsonFetcher, UpstreamRequest};

const MAX_RETRIES: u32 = 3;
const MAX_RETRY_WAIT_SECS: u64 = 10;
/// Longest slice of a non-JSON error body quoted in an error message.
const BODY_EXCERPT_LEN: usize = 200;

/// HTTP implementation of [`JsonFetcher`].
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl HttpFetcher {
    /// Create a fetcher with the given per-request timeout and an overall
    /// budget of `requests_per_second` across all upstreams.
    pub fn new(timeout: Duration, requests_per_second: u32) -> Result<Self> {
        let per_second = NonZeroU32::new(requests_per_second)
            .ok_or_else(|| Error::Config("requests_per_second must be at least 1".into()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    fn build(&self, request: &UpstreamRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(request.url())
            .header(ACCEPT, "application/json")
            .query(&request.query);

        match &request.auth {
            Auth::None => {}
            Auth::Query(params) => builder = builder.query(params),
            Auth::Headers(headers) => {
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
            }
            Auth::Bearer(token) => builder = builder.bearer_auth(token),
        }

        builder
    }

    /// Execute a GET request with rate limiting and 429-retry logic.
    async fn send(&self, request: &UpstreamRequest) -> Result<reqwest::Response> {
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            let resp = self
                .build(request)
                .send()
                .await
                .map_err(|e| Error::transport(request.upstream, e.to_string()))?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1)
                    .min(MAX_RETRY_WAIT_SECS);
                warn!(
                    upstream = request.upstream,
                    retry = retries,
                    wait_secs = wait,
                    "Upstream returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            return Ok(resp);
        }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value> {
        debug!(upstream = request.upstream, path = %request.path, "Upstream request");

        let resp = self.send(request).await?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(request.upstream, e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&body).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(error_envelope)
                .unwrap_or_else(|| excerpt(&body));
            return Err(Error::upstream_status(
                request.upstream,
                status.as_u16(),
                message,
            ));
        }

        let value = parsed
            .ok_or_else(|| Error::malformed(request.upstream, "response body is not JSON"))?;

        if let Some(message) = error_envelope(&value) {
            return Err(Error::upstream_status(
                request.upstream,
                status.as_u16(),
                message,
            ));
        }

        Ok(value)
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_rejected() {
        let err = HttpFetcher::new(Duration::from_secs(1), 0).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        assert_eq!(excerpt("  short  "), "short");
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert_eq!(cut.len(), BODY_EXCERPT_LEN + 3);
        assert!(cut.ends_with("..."));
    }
}
