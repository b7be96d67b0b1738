//! Request-level orchestration: discovery, then enrichment, then assembly.

use std::sync::Arc;

use randomedia_core::{DiscoveryBudget, Result, Sampler};
use tracing::info;

use crate::catalog::{ArtistFinder, MovieFinder, ShowFinder};
use crate::config::Config;
use crate::enrichment::{EnrichmentPolicy, EventSearch, TrailerSearch};
use crate::projection::{ArtistPayload, MoviePayload, ShowPayload};
use crate::upstream::{
    HttpFetcher, JsonFetcher, SeatGeekClient, SpotifyClient, TmdbClient, UtellyClient,
    YouTubeClient,
};

/// Everything needed to answer the three random endpoints.
///
/// Holds no per-request state; each call takes its own sampler.
#[derive(Clone)]
pub struct RandomService {
    movies: MovieFinder,
    shows: ShowFinder,
    artists: ArtistFinder,
    trailers: TrailerSearch,
    events: EventSearch,
    budget: DiscoveryBudget,
    enrichment: EnrichmentPolicy,
}

impl RandomService {
    /// Build the service on top of real HTTP upstreams.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(
            config.upstreams.request_timeout(),
            config.upstreams.requests_per_second,
        )?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Build the service on top of an arbitrary fetcher.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn JsonFetcher>) -> Result<Self> {
        let upstreams = &config.upstreams;
        let tmdb = TmdbClient::new(fetcher.clone(), &upstreams.tmdb);
        let utelly = UtellyClient::new(fetcher.clone(), &upstreams.utelly, &config.movie.country);
        let spotify = SpotifyClient::new(fetcher.clone(), &upstreams.spotify);
        let seatgeek = SeatGeekClient::new(fetcher.clone(), &upstreams.seatgeek);
        let youtube = YouTubeClient::new(fetcher, &upstreams.youtube);

        Ok(Self {
            movies: MovieFinder::new(tmdb.clone(), utelly),
            shows: ShowFinder::new(tmdb),
            artists: ArtistFinder::new(spotify, &config.artist)?,
            trailers: TrailerSearch::new(youtube),
            events: EventSearch::new(seatgeek),
            budget: config.discovery.budget(),
            enrichment: EnrichmentPolicy {
                strict: config.enrichment.strict,
            },
        })
    }

    /// A random streamable movie with its streaming locations.
    pub async fn random_movie(&self, sampler: &mut dyn Sampler) -> Result<MoviePayload> {
        let payload = self.movies.find(sampler, self.budget).await?;
        info!(
            tmdb_id = payload.movie_info.tmdb_id,
            locations = payload.streaming_info.len(),
            "Random movie selected"
        );
        Ok(payload)
    }

    /// A random named TV show with trailer search results.
    pub async fn random_show(&self, sampler: &mut dyn Sampler) -> Result<ShowPayload> {
        let show = self.shows.find(sampler, self.budget).await?;
        info!(tmdb_id = show.tmdb_id, name = %show.name, "Random show selected");

        let trailers = self
            .enrichment
            .apply("trailers", self.trailers.for_show(&show))
            .await?;

        Ok(ShowPayload {
            data: show,
            trailers,
        })
    }

    /// A random artist with live events matching their name.
    pub async fn random_artist(&self, sampler: &mut dyn Sampler) -> Result<ArtistPayload> {
        let artist = self.artists.find(sampler, self.budget).await?;
        info!(id = %artist.id, name = %artist.name, "Random artist selected");

        let events = self
            .enrichment
            .apply("events", self.events.for_artist(&artist))
            .await?;

        Ok(ArtistPayload { artist, events })
    }
}
