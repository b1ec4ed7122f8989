use std::path::PathBuf;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_SECS;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings read from the environment (and `.env`)
///
/// Remote service credentials are optional here; the clients report missing
/// ones when they are first used.
#[derive(Debug, Clone)]
pub struct Config {
    // SongKeeper
    pub songkeeper_api_url: Option<String>,
    pub songkeeper_access_key: Option<String>,

    // Release cache
    pub release_cache_ttl_secs: i64,
    pub release_snapshot_path: Option<PathBuf>,
    pub show_seed: bool,
    pub seed_fallback: bool,

    // YouTube
    pub youtube_api_key: Option<String>,
    pub youtube_playlist_id: Option<String>,

    // Contact form: notifications go to `contact_to_email` from `contact_from_email`
    pub contact_to_email: Option<String>,
    pub contact_from_email: Option<String>,

    pub tour_dates_path: Option<PathBuf>,
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
    }
}

fn parse_ttl(name: &'static str) -> Result<i64, ConfigError> {
    match var(name) {
        None => Ok(DEFAULT_TTL_SECS),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidValue { name, value }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            songkeeper_api_url: None,
            songkeeper_access_key: None,
            release_cache_ttl_secs: DEFAULT_TTL_SECS,
            release_snapshot_path: None,
            show_seed: false,
            seed_fallback: true,
            youtube_api_key: None,
            youtube_playlist_id: None,
            contact_to_email: None,
            contact_from_email: None,
            tour_dates_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            songkeeper_api_url: var("SONGKEEPER_API_URL"),
            songkeeper_access_key: var("SONGKEEPER_ACCESS_KEY"),

            release_cache_ttl_secs: parse_ttl("RELEASE_CACHE_TTL_SECS")?,
            release_snapshot_path: var("RELEASE_SNAPSHOT_PATH").map(PathBuf::from),
            show_seed: parse_bool("SHOW_SEED", false)?,
            seed_fallback: parse_bool("SEED_FALLBACK", true)?,

            youtube_api_key: var("YOUTUBE_API_KEY"),
            youtube_playlist_id: var("YOUTUBE_PLAYLIST_ID"),

            contact_to_email: var("REPLY_TO_EMAIL"),
            contact_from_email: var("SMTP_USERNAME"),

            tour_dates_path: var("TOUR_DATES_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_parse_bool() {
        std::env::set_var("MUSICSITE_TEST_FLAG_ON", "Yes");
        std::env::set_var("MUSICSITE_TEST_FLAG_BAD", "maybe");
        assert!(parse_bool("MUSICSITE_TEST_FLAG_ON", false).unwrap());
        assert!(parse_bool("MUSICSITE_TEST_FLAG_UNSET", true).unwrap());
        assert!(matches!(
            parse_bool("MUSICSITE_TEST_FLAG_BAD", false),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_ttl() {
        std::env::set_var("MUSICSITE_TEST_TTL", "3600");
        std::env::set_var("MUSICSITE_TEST_TTL_ZERO", "0");
        assert_eq!(parse_ttl("MUSICSITE_TEST_TTL").unwrap(), 3600);
        assert_eq!(parse_ttl("MUSICSITE_TEST_TTL_UNSET").unwrap(), DEFAULT_TTL_SECS);
        assert!(parse_ttl("MUSICSITE_TEST_TTL_ZERO").is_err());
    }
}
