use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::state::{AppScreen, AppState, ATTRIBUTION};
use crate::format::{format_stat_lines, results_header};

const TITLE: &str = "NBA Stat Finder";
const RATE_LIMIT_NOTICE: &str = "please be mindful of limited query calls";

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        AppScreen::Search => render_search(f, state),
        AppScreen::Loading => render_loading(f, state),
        AppScreen::Results => render_results(f, state),
    }
}

fn render_title(f: &mut Frame, area: Rect, text: &str) {
    let title = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

/// Render the search screen.
fn render_search(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_title(f, chunks[0], TITLE);

    let notice = Paragraph::new(
        "Enter an NBA player, select a season, and find their stats!\n\
         Please spell the player's full name to the best of your ability.",
    )
    .alignment(Alignment::Center);
    f.render_widget(notice, chunks[1]);

    let input_block = Block::default()
        .title(" Player ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let input_text = Paragraph::new(state.player_name.as_str())
        .style(Style::default().fg(Color::White))
        .block(input_block);
    f.render_widget(input_text, chunks[2]);

    let cursor_chars = state.player_name[..state.cursor_position].chars().count();
    let cursor_x = input_cursor_x(chunks[2], cursor_chars);
    let cursor_y = chunks[2].y + 1;
    f.set_cursor_position((cursor_x, cursor_y));

    let visible = calculate_visible_rows(chunks[3].height);
    let offset = scroll_offset(state.selected_season_index, visible);
    let rows: Vec<Row> = state
        .seasons
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, season)| {
            let style = if i == state.selected_season_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(season.label())]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(10)])
        .header(
            Row::new(vec!["Season"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(" Seasons "));
    f.render_widget(table, chunks[3]);

    let help = Paragraph::new("Type a name | ↑/↓: Season | Enter: Find Stats | Esc: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);

    render_status_bar(f, chunks[5], state);
}

/// Column of the input cursor, kept inside the bordered box.
fn input_cursor_x(area: Rect, cursor_chars: usize) -> u16 {
    let chars = u16::try_from(cursor_chars).unwrap_or(u16::MAX);
    let last_inner = area.right().saturating_sub(2).max(area.x);
    area.x.saturating_add(1).saturating_add(chars).min(last_inner)
}

/// Render the loading screen.
fn render_loading(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_title(f, chunks[0], TITLE);

    let loading = Paragraph::new(format!(
        "{}...{}",
        state.progress.status_text(),
        RATE_LIMIT_NOTICE
    ))
    .style(Style::default().fg(Color::Yellow))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, chunks[1]);

    render_status_bar(f, chunks[3], state);
}

/// Render the results screen.
fn render_results(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(13),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let Some(result) = state.result.as_ref() else {
        render_title(f, chunks[0], TITLE);
        render_status_bar(f, chunks[3], state);
        return;
    };

    render_title(f, chunks[0], &results_header(&result.player, result.season));

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let rows: Vec<Row> = format_stat_lines(&result.stats)
        .into_iter()
        .map(|(label, value)| Row::new(vec![Cell::from(label), Cell::from(value)]))
        .collect();
    let stats_title = match result.stats.games_played {
        Some(games) => format!(" Per Game ({games} games) "),
        None => " Per Game ".to_string(),
    };
    let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(8)])
        .block(Block::default().borders(Borders::ALL).title(stats_title));
    f.render_widget(table, body[0]);

    let media = &result.media;
    let mut team_info = format!("Last team played for:\n{}\n", media.display_name);
    if let Some(ref stadium) = media.stadium_name {
        team_info.push_str(&format!("Arena: {stadium}\n"));
    }
    team_info.push_str(&format!(
        "\nLogo:\n{}\n\nArena image:\n{}",
        media.logo_image_ref, media.arena_image_ref
    ));
    let team_widget = Paragraph::new(team_info)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Team "));
    f.render_widget(team_widget, body[1]);

    let help = Paragraph::new("Esc/h: Return Home | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let Some(ref error) = state.error_message {
        format!(" Error: {}", error)
    } else if let Some(ref status) = state.status_message {
        format!(" Status: {}", status)
    } else {
        format!(" {}", ATTRIBUTION)
    };

    let style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn calculate_visible_rows(table_height: u16) -> usize {
    (table_height.saturating_sub(4) as usize).max(1)
}

/// First row to draw so that `selected` stays inside a window of `visible` rows.
fn scroll_offset(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}
