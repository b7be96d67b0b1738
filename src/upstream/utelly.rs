//! Utelly streaming-availability lookup (via RapidAPI).
//!
//! Given a TMDB movie ID and a country, Utelly answers with the collection
//! of streaming locations that carry the title. IDs Utelly does not know come
//! back with an empty collection.

use std::sync::Arc;

use randomedia_core::Result;
use serde::Deserialize;
use serde_json::Value;

use super::{decode, Auth, JsonFetcher, UpstreamRequest};
use crate::config::UtellyConfig;

const UPSTREAM: &str = "utelly";

/// Answer to an `idlookup` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UtellyLookup {
    /// Source ID echoed back by Utelly; a string or a number.
    pub id: Option<SourceId>,
    pub collection: Option<UtellyCollection>,
}

/// Identifier that upstreams send either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(u64),
    Text(String),
}

impl SourceId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            SourceId::Number(n) => Some(*n),
            SourceId::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UtellyCollection {
    /// Present only when Utelly knows the title.
    pub id: Option<Value>,
    #[serde(default)]
    pub locations: Vec<UtellyLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UtellyLocation {
    #[serde(default)]
    pub country: Vec<String>,
    pub display_name: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub id: Option<String>,
}

#[derive(Clone)]
pub struct UtellyClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    host: String,
    api_key: String,
    country: String,
}

impl UtellyClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &UtellyConfig, country: &str) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            country: country.to_string(),
        }
    }

    /// Look up streaming availability of a TMDB movie.
    pub async fn lookup(&self, tmdb_id: u64) -> Result<UtellyLookup> {
        let request = UpstreamRequest::new(UPSTREAM, &self.base_url, "idlookup")
            .query("source", "tmdb")
            .query("source_id", tmdb_id)
            .query("country", &self.country)
            .auth(Auth::headers([
                ("x-rapidapi-host", self.host.as_str()),
                ("x-rapidapi-key", self.api_key.as_str()),
            ]));
        let body = self.fetcher.fetch_json(&request).await?;
        decode(UPSTREAM, body)
    }
}
