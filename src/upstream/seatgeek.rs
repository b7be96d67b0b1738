//! SeatGeek live-event search.

use std::sync::Arc;

use randomedia_core::Result;
use serde::Deserialize;

use super::{decode, Auth, JsonFetcher, UpstreamRequest};
use crate::config::SeatGeekConfig;

const UPSTREAM: &str = "seatgeek";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatGeekEvents {
    #[serde(default)]
    pub events: Vec<SeatGeekEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeatGeekEvent {
    pub id: u64,
    pub title: Option<String>,
    pub datetime_utc: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub venue: Option<SeatGeekVenue>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeatGeekVenue {
    pub address: Option<String>,
}

#[derive(Clone)]
pub struct SeatGeekClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl SeatGeekClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &SeatGeekConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Free-text event search.
    pub async fn events(&self, query: &str) -> Result<SeatGeekEvents> {
        let request = UpstreamRequest::new(UPSTREAM, &self.base_url, "events")
            .query("q", query)
            .auth(Auth::query([
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ]));
        let body = self.fetcher.fetch_json(&request).await?;
        decode(UPSTREAM, body)
    }
}
