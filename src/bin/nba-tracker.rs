//! NBA Stat Finder
//!
//! A terminal user interface for looking up a player's season averages and
//! their team's logo and arena.

use crossterm::event;
use std::sync::Arc;
use std::time::Duration;

use nba_tracker::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use nba_tracker::{logging, Config, NbaClient};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(config.log_file.as_deref())?;

    let client = Arc::new(NbaClient::new(&config)?);
    info!(balldontlie = %config.balldontlie_url, sportsdb = %config.sportsdb_url, "starting");

    let mut terminal = setup_terminal()?;
    let mut state = AppState::new(config.latest_season);

    loop {
        terminal.draw(|f| render(f, &state))?;

        process_state(&mut state, &client);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
