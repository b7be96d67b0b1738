mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variables that override upstream credentials.
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_UTELLY_HOST: &str = "X_RAPID_HOST_UTELLY";
pub const ENV_UTELLY_KEY: &str = "X_RAPID_KEY_UTELLY";
pub const ENV_SPOTIFY_TOKEN: &str = "SPOTIFY_TOKEN";
pub const ENV_SEATGEEK_ID: &str = "SEATGEEK_ID";
pub const ENV_SEATGEEK_SECRET: &str = "SEATGEEK_SECRET";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./randomedia.toml",
        "~/.config/randomedia/config.toml",
        "/etc/randomedia/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Fall back to defaults; credentials can still come from the environment
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Overwrite upstream credentials with non-empty values from `lookup`
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let upstreams = &mut config.upstreams;
    let targets: [(&str, &mut String); 7] = [
        (ENV_TMDB_API_KEY, &mut upstreams.tmdb.api_key),
        (ENV_UTELLY_HOST, &mut upstreams.utelly.host),
        (ENV_UTELLY_KEY, &mut upstreams.utelly.api_key),
        (ENV_SPOTIFY_TOKEN, &mut upstreams.spotify.token),
        (ENV_SEATGEEK_ID, &mut upstreams.seatgeek.client_id),
        (ENV_SEATGEEK_SECRET, &mut upstreams.seatgeek.client_secret),
        (ENV_GOOGLE_API_KEY, &mut upstreams.youtube.api_key),
    ];

    for (key, slot) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            *slot = value;
        }
    }
}

/// Names of upstream credentials that are still empty
pub fn missing_credentials(config: &Config) -> Vec<&'static str> {
    let upstreams = &config.upstreams;
    [
        (ENV_TMDB_API_KEY, &upstreams.tmdb.api_key),
        (ENV_UTELLY_KEY, &upstreams.utelly.api_key),
        (ENV_SPOTIFY_TOKEN, &upstreams.spotify.token),
        (ENV_SEATGEEK_ID, &upstreams.seatgeek.client_id),
        (ENV_SEATGEEK_SECRET, &upstreams.seatgeek.client_secret),
        (ENV_GOOGLE_API_KEY, &upstreams.youtube.api_key),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(key, _)| key)
    .collect()
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.discovery.max_attempts == 0 {
        anyhow::bail!("discovery.max_attempts must be at least 1");
    }

    if config.artist.assumed_total == 0 {
        anyhow::bail!("artist.assumed_total must be at least 1");
    }

    if config.upstreams.requests_per_second == 0 {
        anyhow::bail!("upstreams.requests_per_second must be at least 1");
    }

    if config.upstreams.request_timeout_secs == 0 {
        anyhow::bail!("upstreams.request_timeout_secs must be at least 1");
    }

    // Missing credentials only surface as upstream errors at request time
    for key in missing_credentials(config) {
        tracing::warn!("Upstream credential {} is not configured", key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.movie.country, "EE");
        assert_eq!(config.artist.assumed_total, 1500);
        assert_eq!(config.artist.query, "year:0000-9999");
        assert_eq!(config.artist.market, "US");
        assert!(!config.enrichment.strict);
        assert_eq!(config.discovery.budget().max_attempts, 50);
    }

    #[test]
    fn env_overrides_replace_credentials() {
        let env: HashMap<&str, &str> = [
            (ENV_TMDB_API_KEY, "tmdb-key"),
            (ENV_SPOTIFY_TOKEN, "token"),
            (ENV_GOOGLE_API_KEY, "   "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.upstreams.youtube.api_key = "from-file".into();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.upstreams.tmdb.api_key, "tmdb-key");
        assert_eq!(config.upstreams.spotify.token, "token");
        // Blank values do not clobber file settings
        assert_eq!(config.upstreams.youtube.api_key, "from-file");
        assert_eq!(
            config.upstreams.utelly.host,
            "utelly-tv-shows-and-movies-availability-v1.p.rapidapi.com"
        );
    }

    #[test]
    fn lists_missing_credentials() {
        let mut config = Config::default();
        assert_eq!(missing_credentials(&config).len(), 6);
        config.upstreams.tmdb.api_key = "k".into();
        assert!(!missing_credentials(&config).contains(&ENV_TMDB_API_KEY));
    }

    #[test]
    fn rejects_zero_limits() {
        let mut config = Config::default();
        config.discovery.max_attempts = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.artist.assumed_total = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.upstreams.requests_per_second = 0;
        assert!(validate_config(&config).is_err());

        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn zero_elapsed_disables_time_limit() {
        let discovery = DiscoveryConfig {
            max_attempts: 7,
            max_elapsed_secs: 0,
        };
        let budget = discovery.budget();
        assert_eq!(budget.max_attempts, 7);
        assert_eq!(budget.max_elapsed, None);
    }
}
