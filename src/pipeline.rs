//! The player → season averages → team media lookup chain.
//!
//! [`run_query`] is a plain blocking function.  Callers that own an event
//! loop run it on a worker thread and forward the progress callbacks back
//! to their loop themselves.

use std::fmt;

use tracing::{info, warn};

use crate::client::{HttpTransport, NbaClient};
use crate::error::{ErrorKind, LookupError};
use crate::models::{PlayerRecord, SeasonStats, TeamMedia};
use crate::season::Season;

/// One of the three sequential lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lookup,
    Stats,
    Media,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Lookup => "LOOKUP",
            Stage::Stats => "STATS",
            Stage::Media => "MEDIA",
        })
    }
}

/// Progress of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    LookingUpPlayer,
    FetchingStats,
    FetchingMedia,
    Done,
    Failed(Stage),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }

    /// Short status line for a loading indicator.
    pub fn status_text(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Ready",
            PipelineState::LookingUpPlayer => "Looking up player",
            PipelineState::FetchingStats => "Loading season averages",
            PipelineState::FetchingMedia => "Loading team data",
            PipelineState::Done => "Done.",
            PipelineState::Failed(_) => "Failed",
        }
    }
}

/// Input of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub player_name: String,
    pub season: Season,
}

impl Query {
    pub fn new(player_name: impl Into<String>, season: Season) -> Self {
        Self {
            player_name: player_name.into(),
            season,
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success {
        player: PlayerRecord,
        stats: SeasonStats,
        media: TeamMedia,
    },
    Failure {
        stage: Stage,
        kind: ErrorKind,
        message: String,
    },
}

impl QueryOutcome {
    fn failure(stage: Stage, err: &LookupError) -> Self {
        QueryOutcome::Failure {
            stage,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// The state a run ends in.
    pub fn final_state(&self) -> PipelineState {
        match self {
            QueryOutcome::Success { .. } => PipelineState::Done,
            QueryOutcome::Failure { stage, .. } => PipelineState::Failed(*stage),
        }
    }
}

/// Run the three lookups in order, stopping at the first failure.
///
/// `on_progress` receives every state the run enters, ending with `Done`
/// or `Failed`.  Nothing is retried.
pub fn run_query<T, F>(client: &NbaClient<T>, query: &Query, mut on_progress: F) -> QueryOutcome
where
    T: HttpTransport,
    F: FnMut(PipelineState),
{
    info!(player = %query.player_name, season = %query.season, "query started");

    let outcome = run_stages(client, query, &mut on_progress);
    match &outcome {
        QueryOutcome::Success { player, .. } => {
            info!(id = player.id, "query finished");
        }
        QueryOutcome::Failure {
            stage,
            kind,
            message,
        } => {
            warn!(%stage, %kind, %message, "query failed");
        }
    }
    on_progress(outcome.final_state());
    outcome
}

fn run_stages<T, F>(client: &NbaClient<T>, query: &Query, on_progress: &mut F) -> QueryOutcome
where
    T: HttpTransport,
    F: FnMut(PipelineState),
{
    on_progress(PipelineState::LookingUpPlayer);
    let player = match client.players().find(&query.player_name) {
        Ok(player) => player,
        Err(e) => return QueryOutcome::failure(Stage::Lookup, &e),
    };

    on_progress(PipelineState::FetchingStats);
    let stats = match client.season_averages().get(player.id, query.season) {
        Ok(stats) => stats,
        Err(e) => return QueryOutcome::failure(Stage::Stats, &e),
    };

    on_progress(PipelineState::FetchingMedia);
    let media = match client.teams().find(&player.current_team_name) {
        Ok(media) => media,
        Err(e) => return QueryOutcome::failure(Stage::Media, &e),
    };

    QueryOutcome::Success {
        player,
        stats,
        media,
    }
}
