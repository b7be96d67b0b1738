//! Random TV show.

use async_trait::async_trait;
use randomedia_core::{
    Candidate, Discovery, DiscoveryBudget, Rejection, Resolver, Result, Sampler,
};
use tracing::debug;

use crate::projection::ShowInfo;
use crate::upstream::tmdb::TmdbShow;
use crate::upstream::TmdbClient;

/// Samples TMDB show IDs until one has a name.
#[derive(Clone)]
pub struct ShowFinder {
    tmdb: TmdbClient,
}

impl ShowFinder {
    pub fn new(tmdb: TmdbClient) -> Self {
        Self { tmdb }
    }

    pub async fn find(
        &self,
        sampler: &mut dyn Sampler,
        budget: DiscoveryBudget,
    ) -> Result<ShowInfo> {
        let bound = self.tmdb.latest_show_id().await?;
        debug!(bound = bound.get(), "Show catalog bound");

        let found = Discovery::new(self, sampler, bound, budget).run().await?;
        Ok(found.entity)
    }
}

#[async_trait]
impl Resolver for ShowFinder {
    type Raw = TmdbShow;
    type Valid = ShowInfo;

    fn entity(&self) -> &'static str {
        "show"
    }

    async fn resolve(&self, candidate: Candidate) -> Result<TmdbShow> {
        self.tmdb.show(candidate.get()).await
    }

    fn validate(&self, raw: TmdbShow) -> std::result::Result<ShowInfo, Rejection> {
        let name = raw.name.ok_or_else(|| Rejection::new("show has no name"))?;
        Ok(ShowInfo {
            release_year: raw.first_air_date.as_deref().and_then(leading_year),
            first_air_date: raw.first_air_date,
            tmdb_id: raw.id,
            number_of_episodes: raw.number_of_episodes,
            number_of_seasons: raw.number_of_seasons,
            status: raw.status,
            in_production: raw.in_production,
            name,
        })
    }
}

/// Integer prefix of a date string: `"2020-05-01"` → `2020`.
fn leading_year(date: &str) -> Option<i32> {
    let date = date.trim_start();
    let digits = date
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(date.len(), |(i, _)| i);
    date[..digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn year_parsing() {
        assert_eq!(leading_year("2020-05-01"), Some(2020));
        assert_eq!(leading_year("1999"), Some(1999));
        assert_eq!(leading_year(" 2004-01"), Some(2004));
        assert_eq!(leading_year(""), None);
        assert_eq!(leading_year("unknown"), None);
    }

    #[test]
    fn named_show_projects_exactly() {
        let raw: TmdbShow = serde_json::from_value(json!({
            "id": 5,
            "name": "Foo",
            "first_air_date": "2020-05-01",
            "number_of_episodes": 10,
            "number_of_seasons": 1,
            "status": "Ended",
            "in_production": false,
            "overview": "not exposed",
            "genres": [{"id": 1, "name": "Drama"}]
        }))
        .unwrap();

        let show = finder().validate(raw).unwrap();
        assert_eq!(
            serde_json::to_value(show).unwrap(),
            json!({
                "first_air_date": "2020-05-01",
                "tmdb_id": 5,
                "number_of_episodes": 10,
                "number_of_seasons": 1,
                "status": "Ended",
                "in_production": false,
                "name": "Foo",
                "release_year": 2020
            })
        );
    }

    #[test]
    fn unnamed_show_is_rejected() {
        let raw: TmdbShow = serde_json::from_value(json!({"id": 6, "name": null})).unwrap();
        let rejection = finder().validate(raw).unwrap_err();
        assert_eq!(rejection.reason(), "show has no name");
    }

    #[test]
    fn missing_air_date_has_no_year() {
        let raw: TmdbShow =
            serde_json::from_value(json!({"id": 7, "name": "Bar", "first_air_date": ""})).unwrap();
        let show = finder().validate(raw).unwrap();
        assert_eq!(show.release_year, None);
    }

    fn finder() -> ShowFinder {
        use crate::config::TmdbConfig;
        use crate::upstream::{JsonFetcher, UpstreamRequest};
        use std::sync::Arc;

        struct Offline;

        #[async_trait]
        impl JsonFetcher for Offline {
            async fn fetch_json(&self, request: &UpstreamRequest) -> Result<serde_json::Value> {
                Err(randomedia_core::Error::transport(request.upstream, "offline"))
            }
        }

        ShowFinder::new(TmdbClient::new(Arc::new(Offline), &TmdbConfig::default()))
    }
}
