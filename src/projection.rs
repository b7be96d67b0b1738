//! Public response shapes.
//!
//! Each type here is an explicit field mapping from an upstream answer. No
//! upstream document is passed through as-is, so every field a client can
//! see is listed below.

use serde::Serialize;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Movie
// ---------------------------------------------------------------------------

/// Descriptive movie fields from TMDB.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieInfo {
    pub adult: Option<bool>,
    pub tmdb_id: u64,
    pub imdb_id: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    /// Original language (ISO 639-1)
    pub language: Option<String>,
    pub release_date: Option<String>,
}

/// One streaming service carrying the movie.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StreamingInfo {
    pub country: Vec<String>,
    pub streaming_icon: Option<String>,
    pub streaming_name: Option<String>,
    pub url: Option<String>,
    pub utelly_id: Option<String>,
}

/// Body of `GET /movie/random`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MoviePayload {
    pub movie_info: MovieInfo,
    pub streaming_info: Vec<StreamingInfo>,
}

// ---------------------------------------------------------------------------
// TV show
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShowInfo {
    pub first_air_date: Option<String>,
    pub tmdb_id: u64,
    pub number_of_episodes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub status: Option<String>,
    pub in_production: Option<bool>,
    pub name: String,
    /// Year parsed from `first_air_date`
    pub release_year: Option<i32>,
}

/// Trailer candidate from the video search.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Trailer {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub channel: Option<String>,
    pub description: Option<String>,
}

/// Body of `GET /tv/random`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShowPayload {
    pub data: ShowInfo,
    pub trailers: Vec<Trailer>,
}

// ---------------------------------------------------------------------------
// Artist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ArtistInfo {
    pub spotify_link: Option<String>,
    pub followers: Option<u64>,
    pub id: String,
    pub name: String,
}

/// Upcoming live event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Event {
    pub title: Option<String>,
    pub id: u64,
    pub datetime_utc: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: Option<String>,
    pub url: Option<String>,
}

/// Body of `GET /artist/random`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ArtistPayload {
    pub artist: ArtistInfo,
    pub events: Vec<Event>,
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Successful response: `{"status": "ok", ...payload}`.
///
/// Errors use the same `status` tag (see `server::error`), so clients can
/// branch on one field.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    status: &'static str,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            status: "ok",
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_flattens_payload() {
        let payload = ArtistPayload {
            artist: ArtistInfo {
                spotify_link: Some("https://open.spotify.com/artist/1".into()),
                followers: Some(10),
                id: "1".into(),
                name: "Band".into(),
            },
            events: vec![],
        };

        let value = serde_json::to_value(Envelope::ok(payload)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "ok",
                "artist": {
                    "spotify_link": "https://open.spotify.com/artist/1",
                    "followers": 10,
                    "id": "1",
                    "name": "Band"
                },
                "events": []
            })
        );
    }

    #[test]
    fn event_kind_serializes_as_type() {
        let event = Event {
            title: Some("Band live".into()),
            id: 4,
            datetime_utc: Some("2026-11-01T20:00:00".into()),
            kind: Some("concert".into()),
            address: Some("1 Main St".into()),
            url: None,
        };
        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["type"], "concert");
        assert!(value.get("kind").is_none());
    }
}
