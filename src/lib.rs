//! NBA season-average lookups for Rust.
//!
//! Finds a player on [balldontlie](https://www.balldontlie.io), fetches their
//! regular-season averages, then looks up the player's team on
//! [TheSportsDB](https://www.thesportsdb.com) for a logo and arena image.
//!
//! # Quick Start
//!
//! ```no_run
//! use nba_tracker::{run_query, Config, NbaClient, Query, QueryOutcome, Season};
//!
//! let client = NbaClient::new(&Config::default()).unwrap();
//! let query = Query::new("LeBron James", Season::parse("2022-23").unwrap());
//!
//! match run_query(&client, &query, |_| {}) {
//!     QueryOutcome::Success { player, stats, media } => {
//!         println!("{}: {} ppg for the {}", player.full_name(), stats.points, media.display_name);
//!     }
//!     QueryOutcome::Failure { stage, message, .. } => eprintln!("{stage}: {message}"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod season;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{
    HttpTransport, NbaClient, PlayersClient, ReqwestTransport, SeasonAveragesClient, TeamsClient,
};
pub use config::Config;
pub use error::{ErrorKind, LookupError};
pub use models::{PlayerRecord, SeasonStats, TeamMedia};
pub use pipeline::{run_query, PipelineState, Query, QueryOutcome, Stage};
pub use season::{available_seasons, Season};
