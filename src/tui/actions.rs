use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use super::state::{AppState, WorkerMessage};
use crate::client::{HttpTransport, NbaClient};
use crate::pipeline::run_query;

/// Process the current state: hand a queued search to a worker thread and
/// apply whatever the running worker has reported since the last tick.
pub fn process_state<T>(state: &mut AppState, client: &Arc<NbaClient<T>>)
where
    T: HttpTransport + Send + Sync + 'static,
{
    if let Some(query) = state.pending_query.take() {
        let (tx, rx) = mpsc::channel();
        let client = Arc::clone(client);
        debug!(player = %query.player_name, season = %query.season, "spawning search worker");

        thread::spawn(move || {
            let progress_tx = tx.clone();
            let outcome = run_query(&*client, &query, |s| {
                let _ = progress_tx.send(WorkerMessage::Progress(s));
            });
            let _ = tx.send(WorkerMessage::Finished(outcome));
        });
        state.worker = Some(rx);
    }

    drain_worker(state);
}

fn drain_worker(state: &mut AppState) {
    loop {
        let Some(rx) = state.worker.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(message) => state.apply_worker_message(message),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                state.worker_lost();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{LookupError, Result};
    use crate::tui::state::AppScreen;
    use std::time::{Duration, Instant};

    struct CannedTransport;

    impl HttpTransport for CannedTransport {
        fn get(&self, url: &str, _authorization: Option<&str>) -> Result<String> {
            if url.contains("/players?") {
                Ok(r#"{"data": []}"#.to_string())
            } else {
                Err(LookupError::Transport {
                    status: Some(500),
                    message: "unexpected call".into(),
                })
            }
        }
    }

    #[test]
    fn worker_outcome_is_applied_on_the_loop() {
        let client = Arc::new(NbaClient::with_transport(
            CannedTransport,
            &Config::default(),
        ));
        let mut state = AppState::default();
        state.start_search();

        let deadline = Instant::now() + Duration::from_secs(5);
        process_state(&mut state, &client);
        while state.is_busy() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
            process_state(&mut state, &client);
        }

        assert_eq!(state.screen, AppScreen::Search);
        assert!(state
            .error_message
            .as_deref()
            .unwrap()
            .ends_with("Player could not be found."));
    }
}
