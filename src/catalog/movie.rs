//! Random movie with streaming availability.

use async_trait::async_trait;
use randomedia_core::{
    Candidate, Discovery, DiscoveryBudget, Rejection, Resolver, Result, Sampler,
};
use tracing::debug;

use crate::projection::{MovieInfo, MoviePayload, StreamingInfo};
use crate::upstream::tmdb::TmdbMovie;
use crate::upstream::utelly::{UtellyLocation, UtellyLookup};
use crate::upstream::{TmdbClient, UtellyClient};

/// A candidate ID together with Utelly's answer for it.
#[derive(Debug, Clone)]
pub struct StreamingLookup {
    pub candidate: Candidate,
    pub response: UtellyLookup,
}

/// A movie Utelly knows how to stream.
#[derive(Debug, Clone)]
pub struct AvailableMovie {
    /// TMDB ID echoed by Utelly, or the candidate when Utelly omits it.
    pub tmdb_id: u64,
    pub locations: Vec<UtellyLocation>,
}

/// Samples TMDB movie IDs until Utelly reports a streaming collection.
#[derive(Clone)]
pub struct MovieFinder {
    tmdb: TmdbClient,
    utelly: UtellyClient,
}

impl MovieFinder {
    pub fn new(tmdb: TmdbClient, utelly: UtellyClient) -> Self {
        Self { tmdb, utelly }
    }

    /// Discover a streamable movie and fetch its TMDB details.
    pub async fn find(
        &self,
        sampler: &mut dyn Sampler,
        budget: DiscoveryBudget,
    ) -> Result<MoviePayload> {
        let bound = self.tmdb.latest_movie_id().await?;
        debug!(bound = bound.get(), "Movie catalog bound");

        let found = Discovery::new(self, sampler, bound, budget).run().await?;
        let detail = self.tmdb.movie(found.entity.tmdb_id).await?;

        Ok(project(detail, found.entity.locations))
    }
}

#[async_trait]
impl Resolver for MovieFinder {
    type Raw = StreamingLookup;
    type Valid = AvailableMovie;

    fn entity(&self) -> &'static str {
        "movie"
    }

    async fn resolve(&self, candidate: Candidate) -> Result<StreamingLookup> {
        let response = self.utelly.lookup(candidate.get()).await?;
        Ok(StreamingLookup {
            candidate,
            response,
        })
    }

    fn validate(&self, raw: StreamingLookup) -> std::result::Result<AvailableMovie, Rejection> {
        let collection = raw
            .response
            .collection
            .filter(|c| c.id.is_some())
            .ok_or_else(|| Rejection::new("no streaming collection"))?;

        let tmdb_id = raw
            .response
            .id
            .as_ref()
            .and_then(|id| id.as_u64())
            .unwrap_or(raw.candidate.get());

        Ok(AvailableMovie {
            tmdb_id,
            locations: collection.locations,
        })
    }
}

/// Combine TMDB details and Utelly locations into the public payload.
pub fn project(detail: TmdbMovie, locations: Vec<UtellyLocation>) -> MoviePayload {
    MoviePayload {
        movie_info: MovieInfo {
            adult: detail.adult,
            tmdb_id: detail.id,
            imdb_id: detail.imdb_id,
            description: detail.overview,
            title: detail.title,
            status: detail.status,
            language: detail.original_language,
            release_date: detail.release_date,
        },
        streaming_info: locations.into_iter().map(streaming_info).collect(),
    }
}

fn streaming_info(location: UtellyLocation) -> StreamingInfo {
    StreamingInfo {
        country: location.country,
        streaming_icon: location.icon,
        streaming_name: location.display_name,
        url: location.url,
        utelly_id: location.id,
    }
}
