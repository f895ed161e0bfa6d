use std::sync::mpsc::Receiver;

use crate::config::EARLIEST_SEASON;
use crate::pipeline::{PipelineState, Query, QueryOutcome};
use crate::season::{available_seasons, Season};
use crate::{PlayerRecord, SeasonStats, TeamMedia};

pub(crate) const ATTRIBUTION: &str = "Data provided by the balldontlie API and TheSportsDB API.";

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Name input and season selection.
    Search,
    /// A search is running on the worker thread.
    Loading,
    /// Season averages and team media of the last successful search.
    Results,
}

/// Message sent from the search worker to the event loop.
#[derive(Debug)]
pub enum WorkerMessage {
    Progress(PipelineState),
    Finished(QueryOutcome),
}

/// A successful search, kept for the results screen.
#[derive(Debug, Clone)]
pub(crate) struct SearchResult {
    pub(crate) season: Season,
    pub(crate) player: PlayerRecord,
    pub(crate) stats: SeasonStats,
    pub(crate) media: TeamMedia,
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Player name typed by the user.
    pub(crate) player_name: String,
    /// Cursor position in the name input, in bytes.
    pub(crate) cursor_position: usize,
    /// Selectable seasons, newest first.
    pub(crate) seasons: Vec<Season>,
    /// Currently selected season index.
    pub(crate) selected_season_index: usize,
    /// Query waiting to be handed to a worker.
    pub(crate) pending_query: Option<Query>,
    /// Season of the queued or running search.
    pub(crate) searched_season: Option<Season>,
    /// Channel of the running worker, if any.
    pub(crate) worker: Option<Receiver<WorkerMessage>>,
    /// Last progress reported by the worker.
    pub(crate) progress: PipelineState,
    /// Result of the last successful search.
    pub(crate) result: Option<SearchResult>,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Informational message to display.
    pub(crate) status_message: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LATEST_SEASON)
    }
}

impl AppState {
    /// Create a new application state offering seasons from `latest_season`
    /// back to 1980, with the newest preselected.
    pub fn new(latest_season: u16) -> Self {
        let player_name = "LeBron James".to_string();
        Self {
            screen: AppScreen::Search,
            cursor_position: player_name.len(),
            player_name,
            seasons: available_seasons(latest_season, EARLIEST_SEASON),
            selected_season_index: 0,
            pending_query: None,
            searched_season: None,
            worker: None,
            progress: PipelineState::Idle,
            result: None,
            error_message: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub(crate) fn selected_season(&self) -> Option<Season> {
        self.seasons.get(self.selected_season_index).copied()
    }

    /// A search is queued or running; the trigger stays disabled meanwhile.
    pub(crate) fn is_busy(&self) -> bool {
        self.pending_query.is_some() || self.worker.is_some()
    }

    /// Queue a search for the current input.  Ignored while busy.
    pub(crate) fn start_search(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(season) = self.selected_season() else {
            self.set_error("No season selected".to_string());
            return;
        };
        self.clear_error();
        self.status_message = None;
        self.result = None;
        self.searched_season = Some(season);
        self.pending_query = Some(Query::new(self.player_name.trim(), season));
        self.progress = PipelineState::Idle;
        self.screen = AppScreen::Loading;
    }

    /// Apply one worker message.  Runs on the event loop only.
    pub(crate) fn apply_worker_message(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::Progress(state) => self.progress = state,
            WorkerMessage::Finished(outcome) => {
                self.worker = None;
                self.progress = outcome.final_state();
                let searched_season = self.searched_season.take();
                match outcome {
                    QueryOutcome::Success {
                        player,
                        stats,
                        media,
                    } => {
                        let Some(season) = searched_season.or_else(|| self.selected_season())
                        else {
                            self.set_error("No season selected".to_string());
                            self.return_home();
                            return;
                        };
                        self.result = Some(SearchResult {
                            season,
                            player,
                            stats,
                            media,
                        });
                        self.status_message = Some(PipelineState::Done.status_text().to_string());
                        self.screen = AppScreen::Results;
                    }
                    QueryOutcome::Failure {
                        stage,
                        kind,
                        message,
                    } => {
                        self.set_error(format!("{kind} ({stage}): {message}"));
                        self.return_home();
                    }
                }
            }
        }
    }

    /// The worker went away without reporting an outcome.
    pub(crate) fn worker_lost(&mut self) {
        self.worker = None;
        self.searched_season = None;
        self.set_error("Search stopped unexpectedly".to_string());
        self.return_home();
    }

    /// Back to the search screen, keeping the typed name and season.
    pub(crate) fn return_home(&mut self) {
        self.screen = AppScreen::Search;
        self.result = None;
        self.progress = PipelineState::Idle;
        self.status_message = None;
    }

    /// Clear any error message.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }
}
