//! Upstream API clients.
//!
//! Every upstream is reached through a [`JsonFetcher`]: one GET request in,
//! one decoded JSON document (or an [`Error`]) out. Credentials travel inside
//! the [`UpstreamRequest`] as an [`Auth`] value supplied by the typed client
//! that built it, never by the fetcher itself.
//!
//! The typed clients in the submodules turn catalog operations into requests
//! and decode the answers into their own response types.

pub mod http;
pub mod seatgeek;
pub mod spotify;
pub mod tmdb;
pub mod utelly;
pub mod youtube;

use async_trait::async_trait;
use randomedia_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use http::HttpFetcher;
pub use seatgeek::SeatGeekClient;
pub use spotify::SpotifyClient;
pub use tmdb::TmdbClient;
pub use utelly::UtellyClient;
pub use youtube::YouTubeClient;

/// How a request authenticates against its upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// No credentials.
    None,
    /// Credentials embedded as query parameters (e.g. `api_key`).
    Query(Vec<(String, String)>),
    /// Credentials sent as request headers.
    Headers(Vec<(String, String)>),
    /// OAuth bearer token in the `Authorization` header.
    Bearer(String),
}

impl Auth {
    /// Build [`Auth::Query`] from borrowed pairs.
    pub fn query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Auth::Query(owned_pairs(pairs))
    }

    /// Build [`Auth::Headers`] from borrowed pairs.
    pub fn headers<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Auth::Headers(owned_pairs(pairs))
    }
}

fn owned_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A fully-formed GET request against one upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Short upstream name used in logs and errors (e.g. `"tmdb"`).
    pub upstream: &'static str,
    pub base_url: String,
    /// Path relative to `base_url`, without a leading slash.
    pub path: String,
    /// Non-credential query parameters, in order.
    pub query: Vec<(String, String)>,
    pub auth: Auth,
}

impl UpstreamRequest {
    pub fn new(upstream: &'static str, base_url: &str, path: impl Into<String>) -> Self {
        Self {
            upstream,
            base_url: base_url.to_string(),
            path: path.into(),
            query: Vec::new(),
            auth: Auth::None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// `base_url` and `path` joined with exactly one slash.
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// First value of a non-credential query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Issues a single request and returns the decoded JSON body.
///
/// Implementations report network failures as [`Error::Transport`], non-2xx
/// answers and error envelopes as [`Error::UpstreamStatus`], and bodies that
/// are not JSON as [`Error::MalformedUpstream`].
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value>;
}

/// Decode a JSON document into a typed upstream response.
pub fn decode<T: DeserializeOwned>(upstream: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::malformed(upstream, e.to_string()))
}

/// Extract the message of an upstream error envelope, if `body` is one.
///
/// Recognises `{"error": {"message": ..}}` (Spotify, Google),
/// `{"error": "..."}`, and TMDB's `{"success": false, "status_message": ..}`.
pub fn error_envelope(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            Value::String(s) => s.clone(),
            Value::Object(inner) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        };
        return Some(message);
    }

    if object.get("success").and_then(Value::as_bool) == Some(false) {
        let message = object
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("request unsuccessful");
        return Some(message.to_string());
    }

    None
}
