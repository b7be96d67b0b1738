//! Spotify Web API artist search.
//!
//! Search is the only way to reach the artist catalog, so random artists are
//! found by paging through a broad search one result at a time.

use std::sync::Arc;

use randomedia_core::Result;
use serde::Deserialize;
use serde_json::Value;

use super::{decode, Auth, JsonFetcher, UpstreamRequest};
use crate::config::SpotifyConfig;

const UPSTREAM: &str = "spotify";

/// Answer to a `search?type=artist` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifySearch {
    /// Error object Spotify returns instead of results (e.g. offset too large).
    pub error: Option<Value>,
    pub artists: Option<SpotifyArtistPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyArtistPage {
    #[serde(default)]
    pub items: Vec<SpotifyArtist>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: SpotifyExternalUrls,
    #[serde(default)]
    pub followers: SpotifyFollowers,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyFollowers {
    pub total: Option<u64>,
}

#[derive(Clone)]
pub struct SpotifyClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &SpotifyConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Search artists matching `query` in `market`, `limit` results from `offset`.
    pub async fn search_artists(
        &self,
        query: &str,
        market: &str,
        offset: u64,
        limit: u32,
    ) -> Result<SpotifySearch> {
        let request = UpstreamRequest::new(UPSTREAM, &self.base_url, "search")
            .query("q", query)
            .query("type", "artist")
            .query("market", market)
            .query("limit", limit)
            .query("offset", offset)
            .auth(Auth::Bearer(self.token.clone()));
        let body = self.fetcher.fetch_json(&request).await?;
        decode(UPSTREAM, body)
    }
}
