//! Text rendering of lookup results for the presentation layer.

use crate::models::{PlayerRecord, SeasonStats};
use crate::season::Season;

/// Render a fraction as a percentage with at most two decimals.
///
/// `0.5` → `"50"`, `0.4567` → `"45.67"`.
pub fn format_percentage(fraction: f64) -> String {
    let fixed = format!("{:.2}", fraction * 100.0);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Render a per-game average, always with a fractional part.
///
/// `25.0` → `"25.0"`, `28.93` → `"28.93"`.
pub fn format_per_game(value: f64) -> String {
    format!("{value:?}")
}

/// `"LeBron James 2022-23 averages:"`
pub fn results_header(player: &PlayerRecord, season: Season) -> String {
    format!("{} {} averages:", player.full_name(), season)
}

/// Label/value rows in display order.
pub fn format_stat_lines(stats: &SeasonStats) -> Vec<(&'static str, String)> {
    vec![
        ("Points per Game", format_per_game(stats.points)),
        ("Rebounds per Game", format_per_game(stats.rebounds)),
        ("Assists per Game", format_per_game(stats.assists)),
        ("Steals per Game", format_per_game(stats.steals)),
        ("Blocks per Game", format_per_game(stats.blocks)),
        ("Turnovers per Game", format_per_game(stats.turnovers)),
        (
            "Field Goal Percentage",
            format!("{}%", format_percentage(stats.field_goal_pct)),
        ),
        (
            "3-Point Percentage",
            format!("{}%", format_percentage(stats.three_point_pct)),
        ),
        (
            "Free Throw Percentage",
            format!("{}%", format_percentage(stats.free_throw_pct)),
        ),
    ]
}
