use std::fmt;

use thiserror::Error;

/// Error type for player, season-average and team lookups.
///
/// - `Transport` — network failure or any non-2xx status
/// - `NotFound` — player search returned no match
/// - `NoStatsForSeason` — player matched but recorded no games that season
/// - `TeamNotFound` — team search returned no match
/// - `Decode` — payload did not have the expected shape
/// - `InvalidSeason` — a season label that is not `YYYY-YY`
/// - `Config` — unusable configuration value
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Player could not be found.")]
    NotFound,

    #[error("This player did not record any stats during the selected season.")]
    NoStatsForSeason,

    #[error("Team could not be found.")]
    TeamNotFound,

    #[error("Could not decode {context}: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },

    #[error("Invalid season label '{0}', expected YYYY-YY")]
    InvalidSeason(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Transport { .. } => ErrorKind::Transport,
            LookupError::NotFound => ErrorKind::NotFound,
            LookupError::NoStatsForSeason => ErrorKind::NoStatsForSeason,
            LookupError::TeamNotFound => ErrorKind::TeamNotFound,
            LookupError::Decode { .. } => ErrorKind::Decode,
            LookupError::InvalidSeason(_) => ErrorKind::InvalidSeason,
            LookupError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Request failed: {err}"),
        }
    }
}

/// Fieldless discriminant of [`LookupError`], carried by a failed
/// [`QueryOutcome`](crate::pipeline::QueryOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    NotFound,
    NoStatsForSeason,
    TeamNotFound,
    Decode,
    InvalidSeason,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "TransportError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::NoStatsForSeason => "NoStatsForSeason",
            ErrorKind::TeamNotFound => "TeamNotFound",
            ErrorKind::Decode => "DecodeError",
            ErrorKind::InvalidSeason => "InvalidSeason",
            ErrorKind::Config => "ConfigError",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
