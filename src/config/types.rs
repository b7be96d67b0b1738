use std::time::Duration;

use randomedia_core::DiscoveryBudget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub movie: MovieConfig,

    #[serde(default)]
    pub artist: ArtistConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub upstreams: UpstreamsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Maximum candidates resolved per request before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wall-clock limit per discovery run in seconds (0 = attempt limit only)
    #[serde(default = "default_max_elapsed_secs")]
    pub max_elapsed_secs: u64,
}

fn default_max_attempts() -> u32 {
    50
}
fn default_max_elapsed_secs() -> u64 {
    30
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_elapsed_secs: default_max_elapsed_secs(),
        }
    }
}

impl DiscoveryConfig {
    pub fn budget(&self) -> DiscoveryBudget {
        let budget = DiscoveryBudget::attempts(self.max_attempts);
        if self.max_elapsed_secs == 0 {
            budget
        } else {
            budget.with_max_elapsed(Duration::from_secs(self.max_elapsed_secs))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovieConfig {
    /// Country whose streaming catalogs are queried (ISO 3166-1 alpha-2)
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "EE".to_string()
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistConfig {
    /// Search query paged through to find artists
    #[serde(default = "default_artist_query")]
    pub query: String,

    #[serde(default = "default_market")]
    pub market: String,

    /// Number of search results assumed to exist. Spotify's reported total
    /// for this query is unreliable, so offsets are drawn below this value.
    #[serde(default = "default_assumed_total")]
    pub assumed_total: u64,
}

fn default_artist_query() -> String {
    "year:0000-9999".to_string()
}
fn default_market() -> String {
    "US".to_string()
}
fn default_assumed_total() -> u64 {
    1500
}

impl Default for ArtistConfig {
    fn default() -> Self {
        Self {
            query: default_artist_query(),
            market: default_market(),
            assumed_total: default_assumed_total(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Fail the whole request when a trailer or event search fails,
    /// instead of answering with an empty list
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamsConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shared request budget across all upstreams
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub utelly: UtellyConfig,

    #[serde(default)]
    pub spotify: SpotifyConfig,

    #[serde(default)]
    pub seatgeek: SeatGeekConfig,

    #[serde(default)]
    pub youtube: YouTubeConfig,
}

fn default_request_timeout() -> u64 {
    30
}
fn default_requests_per_second() -> u32 {
    10
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            requests_per_second: default_requests_per_second(),
            tmdb: TmdbConfig::default(),
            utelly: UtellyConfig::default(),
            spotify: SpotifyConfig::default(),
            seatgeek: SeatGeekConfig::default(),
            youtube: YouTubeConfig::default(),
        }
    }
}

impl UpstreamsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UtellyConfig {
    #[serde(default = "default_utelly_url")]
    pub base_url: String,

    /// Value of the `x-rapidapi-host` header
    #[serde(default = "default_utelly_host")]
    pub host: String,

    #[serde(default)]
    pub api_key: String,
}

fn default_utelly_url() -> String {
    "https://utelly-tv-shows-and-movies-availability-v1.p.rapidapi.com".to_string()
}
fn default_utelly_host() -> String {
    "utelly-tv-shows-and-movies-availability-v1.p.rapidapi.com".to_string()
}

impl Default for UtellyConfig {
    fn default() -> Self {
        Self {
            base_url: default_utelly_url(),
            host: default_utelly_host(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyConfig {
    #[serde(default = "default_spotify_url")]
    pub base_url: String,

    /// OAuth bearer token
    #[serde(default)]
    pub token: String,
}

fn default_spotify_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            base_url: default_spotify_url(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeatGeekConfig {
    #[serde(default = "default_seatgeek_url")]
    pub base_url: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,
}

fn default_seatgeek_url() -> String {
    "https://api.seatgeek.com/2".to_string()
}

impl Default for SeatGeekConfig {
    fn default() -> Self {
        Self {
            base_url: default_seatgeek_url(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    #[serde(default = "default_youtube_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    /// Prefix of trailer links; the video ID is appended as `?v=<id>`
    #[serde(default = "default_watch_url")]
    pub watch_url: String,
}

fn default_youtube_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}
fn default_watch_url() -> String {
    "https://www.youtube.com/watch".to_string()
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_youtube_url(),
            api_key: String::new(),
            watch_url: default_watch_url(),
        }
    }
}
