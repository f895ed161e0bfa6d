use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LookupError, Result};

pub const DEFAULT_BALLDONTLIE_URL: &str = "https://api.balldontlie.io/v1";
pub const DEFAULT_SPORTSDB_URL: &str = "https://www.thesportsdb.com/api/v1/json";
/// TheSportsDB's shared public key.
pub const DEFAULT_SPORTSDB_KEY: &str = "3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LATEST_SEASON: u16 = 2022;
pub const EARLIEST_SEASON: u16 = 1980;

/// Endpoints, keys and UI defaults.
///
/// Every field can be overridden from the environment, see
/// [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub balldontlie_url: String,
    pub balldontlie_key: Option<String>,
    pub sportsdb_url: String,
    pub sportsdb_key: String,
    pub timeout: Duration,
    pub latest_season: u16,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balldontlie_url: DEFAULT_BALLDONTLIE_URL.to_string(),
            balldontlie_key: None,
            sportsdb_url: DEFAULT_SPORTSDB_URL.to_string(),
            sportsdb_key: DEFAULT_SPORTSDB_KEY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            latest_season: DEFAULT_LATEST_SEASON,
            log_file: None,
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// * `BALLDONTLIE_BASE_URL`, `BALLDONTLIE_API_KEY`
    /// * `SPORTSDB_BASE_URL`, `SPORTSDB_API_KEY`
    /// * `NBA_TRACKER_TIMEOUT_SECS`, `NBA_TRACKER_LATEST_SEASON`
    /// * `NBA_TRACKER_LOG` – log file path; logging is off when unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let timeout = match get("NBA_TRACKER_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(LookupError::Config(format!(
                        "NBA_TRACKER_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => defaults.timeout,
        };

        let latest_season = match get("NBA_TRACKER_LATEST_SEASON") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(year) if (EARLIEST_SEASON..=9998).contains(&year) => year,
                _ => {
                    return Err(LookupError::Config(format!(
                        "NBA_TRACKER_LATEST_SEASON must be a year from {EARLIEST_SEASON}, got '{raw}'"
                    )))
                }
            },
            None => defaults.latest_season,
        };

        Ok(Self {
            balldontlie_url: get("BALLDONTLIE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.balldontlie_url),
            balldontlie_key: get("BALLDONTLIE_API_KEY"),
            sportsdb_url: get("SPORTSDB_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.sportsdb_url),
            sportsdb_key: get("SPORTSDB_API_KEY").unwrap_or(defaults.sportsdb_key),
            timeout,
            latest_season,
            log_file: get("NBA_TRACKER_LOG").map(PathBuf::from),
        })
    }
}
