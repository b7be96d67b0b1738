//! Random music artist.
//!
//! Spotify offers no artist ID space to sample, so the candidate is an offset
//! into one broad search. The reported result total for that search is not
//! trustworthy, so offsets are drawn below a configured assumed total instead.
//! Offsets past Spotify's real paging limit come back as errors and are
//! resampled like any other invalid candidate.

use async_trait::async_trait;
use randomedia_core::{
    Candidate, CatalogBound, Discovery, DiscoveryBudget, Error, Rejection, Resolver, Result,
    Sampler,
};

use crate::config::ArtistConfig;
use crate::projection::ArtistInfo;
use crate::upstream::spotify::{SpotifyArtist, SpotifySearch};
use crate::upstream::SpotifyClient;

const PAGE_SIZE: u32 = 1;

/// Samples search offsets until Spotify returns an artist.
#[derive(Clone)]
pub struct ArtistFinder {
    spotify: SpotifyClient,
    query: String,
    market: String,
    assumed_total: CatalogBound,
}

impl ArtistFinder {
    pub fn new(spotify: SpotifyClient, config: &ArtistConfig) -> Result<Self> {
        let assumed_total = CatalogBound::new(config.assumed_total)
            .ok_or_else(|| Error::Config("artist.assumed_total must be at least 1".into()))?;
        Ok(Self {
            spotify,
            query: config.query.clone(),
            market: config.market.clone(),
            assumed_total,
        })
    }

    pub async fn find(
        &self,
        sampler: &mut dyn Sampler,
        budget: DiscoveryBudget,
    ) -> Result<ArtistInfo> {
        let found = Discovery::new(self, sampler, self.assumed_total, budget)
            .run()
            .await?;
        Ok(found.entity)
    }
}

#[async_trait]
impl Resolver for ArtistFinder {
    type Raw = SpotifySearch;
    type Valid = ArtistInfo;

    fn entity(&self) -> &'static str {
        "artist"
    }

    async fn resolve(&self, candidate: Candidate) -> Result<SpotifySearch> {
        self.spotify
            .search_artists(&self.query, &self.market, candidate.get(), PAGE_SIZE)
            .await
    }

    fn validate(&self, raw: SpotifySearch) -> std::result::Result<ArtistInfo, Rejection> {
        if let Some(error) = raw.error {
            return Err(Rejection::new(format!("search returned an error: {error}")));
        }

        raw.artists
            .and_then(|page| page.items.into_iter().next())
            .map(project)
            .ok_or_else(|| Rejection::new("no artist at this offset"))
    }
}

fn project(artist: SpotifyArtist) -> ArtistInfo {
    ArtistInfo {
        spotify_link: artist.external_urls.spotify,
        followers: artist.followers.total,
        id: artist.id,
        name: artist.name,
    }
}
