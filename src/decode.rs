//! Wire shapes of the balldontlie and TheSportsDB responses, and their
//! mapping onto the crate's records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{LookupError, Result};
use crate::models::{PlayerRecord, SeasonStats, TeamMedia};

// ---------------------------------------------------------------------------
// balldontlie
// ---------------------------------------------------------------------------

/// `{ "data": [...] }` wrapper used by both balldontlie endpoints.
#[derive(Deserialize)]
struct DataWrapper<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct PlayerDto {
    id: u64,
    first_name: String,
    last_name: String,
    team: PlayerTeamDto,
}

#[derive(Deserialize)]
struct PlayerTeamDto {
    full_name: String,
}

#[derive(Deserialize)]
struct SeasonAverageDto {
    #[serde(deserialize_with = "null_as_zero")]
    pts: f64,
    #[serde(deserialize_with = "null_as_zero")]
    reb: f64,
    #[serde(deserialize_with = "null_as_zero")]
    ast: f64,
    #[serde(deserialize_with = "null_as_zero")]
    stl: f64,
    #[serde(deserialize_with = "null_as_zero")]
    blk: f64,
    #[serde(deserialize_with = "null_as_zero")]
    turnover: f64,
    #[serde(deserialize_with = "null_as_zero")]
    fg_pct: f64,
    #[serde(deserialize_with = "null_as_zero")]
    fg3_pct: f64,
    #[serde(deserialize_with = "null_as_zero")]
    ft_pct: f64,
    #[serde(default)]
    games_played: Option<u32>,
}

/// A present-but-null number reads as zero; an absent one is still an error.
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl From<PlayerDto> for PlayerRecord {
    fn from(dto: PlayerDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            current_team_name: dto.team.full_name,
        }
    }
}

impl From<SeasonAverageDto> for SeasonStats {
    fn from(dto: SeasonAverageDto) -> Self {
        Self {
            points: dto.pts,
            rebounds: dto.reb,
            assists: dto.ast,
            steals: dto.stl,
            blocks: dto.blk,
            turnovers: dto.turnover,
            field_goal_pct: dto.fg_pct,
            three_point_pct: dto.fg3_pct,
            free_throw_pct: dto.ft_pct,
            games_played: dto.games_played,
        }
    }
}

// ---------------------------------------------------------------------------
// TheSportsDB
// ---------------------------------------------------------------------------

/// TheSportsDB answers an unmatched search with `"teams": null`.
#[derive(Deserialize)]
struct TeamSearchDto {
    #[serde(default)]
    teams: Option<Vec<SportsDbTeamDto>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SportsDbTeamDto {
    str_team: String,
    str_team_badge: String,
    str_stadium_thumb: String,
    #[serde(default)]
    str_stadium: Option<String>,
}

impl From<SportsDbTeamDto> for TeamMedia {
    fn from(dto: SportsDbTeamDto) -> Self {
        Self {
            display_name: dto.str_team,
            logo_image_ref: dto.str_team_badge,
            arena_image_ref: dto.str_stadium_thumb,
            stadium_name: dto.str_stadium.filter(|s| !s.trim().is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public decoders
// ---------------------------------------------------------------------------

fn parse<T: DeserializeOwned>(body: &str, context: &'static str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| LookupError::Decode {
        context,
        message: e.to_string(),
    })
}

/// Decode a `/players` search response, preserving result order.
pub fn decode_player_search(body: &str) -> Result<Vec<PlayerRecord>> {
    let wrapper: DataWrapper<PlayerDto> = parse(body, "player search response")?;
    Ok(wrapper.data.into_iter().map(PlayerRecord::from).collect())
}

/// Decode a `/season_averages` response.
pub fn decode_season_averages(body: &str) -> Result<Vec<SeasonStats>> {
    let wrapper: DataWrapper<SeasonAverageDto> = parse(body, "season averages response")?;
    Ok(wrapper.data.into_iter().map(SeasonStats::from).collect())
}

/// Decode a `searchteams.php` response.  A null team list decodes as empty.
pub fn decode_team_search(body: &str) -> Result<Vec<TeamMedia>> {
    let dto: TeamSearchDto = parse(body, "team search response")?;
    Ok(dto
        .teams
        .unwrap_or_default()
        .into_iter()
        .map(TeamMedia::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PLAYERS: &str = r#"{
        "data": [
            {"id": 237, "first_name": "LeBron", "last_name": "James", "position": "F",
             "team": {"id": 14, "abbreviation": "LAL", "full_name": "Los Angeles Lakers"}},
            {"id": 3547, "first_name": "Bronny", "last_name": "James", "position": "G",
             "team": {"id": 14, "abbreviation": "LAL", "full_name": "Los Angeles Lakers"}}
        ],
        "meta": {"per_page": 25}
    }"#;

    #[test]
    fn player_search_keeps_first_element_fields() {
        let players = decode_player_search(PLAYERS).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0],
            PlayerRecord {
                id: 237,
                first_name: "LeBron".into(),
                last_name: "James".into(),
                current_team_name: "Los Angeles Lakers".into(),
            }
        );
    }

    #[test]
    fn missing_team_name_is_decode_error_naming_field() {
        let body = r#"{"data": [{"id": 1, "first_name": "A", "last_name": "B", "team": {}}]}"#;
        let err = decode_player_search(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("full_name"), "{err}");
    }

    #[test]
    fn season_averages_null_percentage_reads_as_zero() {
        let body = r#"{"data": [{"games_played": 3, "pts": 2.0, "reb": 1.0, "ast": 0.3,
            "stl": 0.0, "blk": 0.0, "turnover": 0.7, "fg_pct": 0.5, "fg3_pct": null,
            "ft_pct": 0.75}]}"#;
        let stats = decode_season_averages(body).unwrap();
        assert_eq!(stats[0].three_point_pct, 0.0);
        assert_eq!(stats[0].free_throw_pct, 0.75);
        assert_eq!(stats[0].games_played, Some(3));
    }

    #[test]
    fn season_averages_missing_field_is_decode_error() {
        let body = r#"{"data": [{"pts": 2.0, "reb": 1.0, "ast": 0.3, "stl": 0.0,
            "blk": 0.0, "turnover": 0.7, "fg_pct": 0.5, "fg3_pct": 0.1}]}"#;
        let err = decode_season_averages(body).unwrap_err();
        assert!(err.to_string().contains("ft_pct"), "{err}");
    }

    #[test]
    fn team_search_null_list_is_empty() {
        assert!(decode_team_search(r#"{"teams": null}"#).unwrap().is_empty());
        assert!(decode_team_search("{}").unwrap().is_empty());
    }

    #[test]
    fn team_search_maps_sportsdb_names() {
        let body = r#"{"teams": [{"idTeam": "134867", "strTeam": "Los Angeles Lakers",
            "strTeamBadge": "https://example.test/badge.png",
            "strStadiumThumb": "https://example.test/arena.jpg",
            "strStadium": "Crypto.com Arena"}]}"#;
        let teams = decode_team_search(body).unwrap();
        assert_eq!(teams[0].display_name, "Los Angeles Lakers");
        assert_eq!(teams[0].logo_image_ref, "https://example.test/badge.png");
        assert_eq!(teams[0].arena_image_ref, "https://example.test/arena.jpg");
        assert_eq!(teams[0].stadium_name.as_deref(), Some("Crypto.com Arena"));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode_team_search("<html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
