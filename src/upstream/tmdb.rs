//! TMDB (The Movie Database) catalog client.
//!
//! TMDB numbers movies and TV shows with dense integer IDs and exposes the
//! newest entry of each catalog at `movie/latest` and `tv/latest`, which is
//! what bounds random sampling.

use std::sync::Arc;

use randomedia_core::{CatalogBound, Error, Result};
use serde::Deserialize;

use super::{decode, Auth, JsonFetcher, UpstreamRequest};
use crate::config::TmdbConfig;

const UPSTREAM: &str = "tmdb";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbLatest {
    id: Option<u64>,
}

/// Movie detail from `movie/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub adult: Option<bool>,
    pub imdb_id: Option<String>,
    pub overview: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<String>,
}

/// TV show detail from `tv/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbShow {
    pub id: u64,
    pub name: Option<String>,
    pub first_air_date: Option<String>,
    pub number_of_episodes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub status: Option<String>,
    pub in_production: Option<bool>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TmdbClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: &TmdbConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, path: String) -> UpstreamRequest {
        UpstreamRequest::new(UPSTREAM, &self.base_url, path)
            .auth(Auth::query([("api_key", self.api_key.as_str())]))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: String) -> Result<T> {
        let body = self.fetcher.fetch_json(&self.request(path)).await?;
        decode(UPSTREAM, body)
    }

    async fn latest(&self, catalog: &str) -> Result<CatalogBound> {
        let latest: TmdbLatest = self.get(format!("{catalog}/latest")).await?;
        let id = latest.id.ok_or_else(|| Error::InvalidCatalogBound {
            upstream: UPSTREAM.to_string(),
            message: format!("{catalog}/latest returned no id"),
        })?;
        CatalogBound::new(id).ok_or_else(|| Error::InvalidCatalogBound {
            upstream: UPSTREAM.to_string(),
            message: format!("{catalog}/latest returned id 0"),
        })
    }

    /// Bound of the movie catalog (ID of the newest movie).
    pub async fn latest_movie_id(&self) -> Result<CatalogBound> {
        self.latest("movie").await
    }

    /// Bound of the TV catalog (ID of the newest show).
    pub async fn latest_show_id(&self) -> Result<CatalogBound> {
        self.latest("tv").await
    }

    pub async fn movie(&self, id: u64) -> Result<TmdbMovie> {
        self.get(format!("movie/{id}")).await
    }

    pub async fn show(&self, id: u64) -> Result<TmdbShow> {
        self.get(format!("tv/{id}")).await
    }
}
