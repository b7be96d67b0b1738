//! YouTube Data API v3 video search.

use std::sync::Arc;

use randomedia_core::Result;
use serde::Deserialize;

use super::{decode, Auth, JsonFetcher, UpstreamRequest};
use crate::config::YouTubeConfig;

const UPSTREAM: &str = "youtube";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YouTubeSearch {
    #[serde(default)]
    pub items: Vec<YouTubeItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeItem {
    pub id: YouTubeItemId,
    #[serde(default)]
    pub snippet: YouTubeSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeSnippet {
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct YouTubeClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    api_key: String,
    watch_url: String,
}

impl YouTubeClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &YouTubeConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            watch_url: config.watch_url.clone(),
        }
    }

    /// High-definition videos matching `query`, most relevant first.
    pub async fn search_videos(&self, query: &str) -> Result<YouTubeSearch> {
        let request = UpstreamRequest::new(UPSTREAM, &self.base_url, "search")
            .query("part", "snippet")
            .query("order", "relevance")
            .query("q", query)
            .query("type", "video")
            .query("videoDefinition", "high")
            .auth(Auth::query([("key", self.api_key.as_str())]));
        let body = self.fetcher.fetch_json(&request).await?;
        decode(UPSTREAM, body)
    }

    /// Watch page of a video.
    pub fn watch_url(&self, video_id: &str) -> String {
        format!("{}?v={video_id}", self.watch_url)
    }
}
