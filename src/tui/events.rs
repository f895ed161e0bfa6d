use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            state.should_quit = true;
            return;
        }
        // 'q' is typed text on the search screen
        if key_event.code == KeyCode::Char('q')
            && state.screen != AppScreen::Search
            && key_event.modifiers == KeyModifiers::NONE
        {
            state.should_quit = true;
            return;
        }

        match state.screen {
            AppScreen::Search => handle_search(key_event, state),
            AppScreen::Results => handle_results(key_event, state),
            AppScreen::Loading => {}
        }
    }
}

fn handle_search(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char(c)
            if matches!(event.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) =>
        {
            state.player_name.insert(state.cursor_position, c);
            state.cursor_position += c.len_utf8();
            state.clear_error();
        }
        KeyCode::Backspace => {
            if let Some(c) = state.player_name[..state.cursor_position].chars().next_back() {
                state.cursor_position -= c.len_utf8();
                state.player_name.remove(state.cursor_position);
                state.clear_error();
            }
        }
        KeyCode::Delete => {
            if state.cursor_position < state.player_name.len() {
                state.player_name.remove(state.cursor_position);
                state.clear_error();
            }
        }
        KeyCode::Left => {
            if let Some(c) = state.player_name[..state.cursor_position].chars().next_back() {
                state.cursor_position -= c.len_utf8();
            }
        }
        KeyCode::Right => {
            if let Some(c) = state.player_name[state.cursor_position..].chars().next() {
                state.cursor_position += c.len_utf8();
            }
        }
        KeyCode::Home => {
            state.cursor_position = 0;
        }
        KeyCode::End => {
            state.cursor_position = state.player_name.len();
        }
        KeyCode::Up => {
            state.selected_season_index = state.selected_season_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.selected_season_index < state.seasons.len().saturating_sub(1) {
                state.selected_season_index += 1;
            }
        }
        KeyCode::PageUp => {
            state.selected_season_index = state.selected_season_index.saturating_sub(10);
        }
        KeyCode::PageDown => {
            state.selected_season_index =
                (state.selected_season_index + 10).min(state.seasons.len().saturating_sub(1));
        }
        KeyCode::Enter => {
            state.start_search();
        }
        KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_results(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            state.return_home();
            state.clear_error();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_edits_name_at_cursor() {
        let mut state = AppState::default();
        state.player_name.clear();
        state.cursor_position = 0;

        for c in "Jokić".chars() {
            handle_event(key(KeyCode::Char(c)), &mut state);
        }
        assert_eq!(state.player_name, "Jokić");

        handle_event(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.player_name, "Joki");
        handle_event(key(KeyCode::Home), &mut state);
        handle_event(key(KeyCode::Delete), &mut state);
        assert_eq!(state.player_name, "oki");
    }

    #[test]
    fn modified_keys_do_not_insert_text() {
        let mut state = AppState::default();
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let event = Event::Key(KeyEvent::new(KeyCode::Char('a'), modifiers));
            handle_event(event, &mut state);
        }
        assert_eq!(state.player_name, "LeBron James");

        let shifted = Event::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        handle_event(shifted, &mut state);
        assert_eq!(state.player_name, "LeBron JamesA");
    }

    #[test]
    fn q_is_text_on_search_screen_but_quits_elsewhere() {
        let mut state = AppState::default();
        handle_event(key(KeyCode::Char('q')), &mut state);
        assert!(!state.should_quit);
        assert!(state.player_name.ends_with('q'));

        state.screen = AppScreen::Results;
        handle_event(key(KeyCode::Char('q')), &mut state);
        assert!(state.should_quit);
    }

    #[test]
    fn arrows_move_season_selection_within_bounds() {
        let mut state = AppState::default();
        handle_event(key(KeyCode::Up), &mut state);
        assert_eq!(state.selected_season_index, 0);
        handle_event(key(KeyCode::Down), &mut state);
        assert_eq!(state.selected_season().unwrap().to_string(), "2021-22");
        for _ in 0..10 {
            handle_event(key(KeyCode::PageDown), &mut state);
        }
        assert_eq!(state.selected_season().unwrap().to_string(), "1980-81");
    }

    #[test]
    fn enter_is_ignored_while_loading() {
        let mut state = AppState::default();
        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.screen, AppScreen::Loading);
        let queued = state.pending_query.clone();

        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.pending_query, queued);
    }
}
