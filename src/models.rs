// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player matched by name search.  Only the first search hit is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub current_team_name: String,
}

impl PlayerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Season averages
// ---------------------------------------------------------------------------

/// Per-game averages for one player over one regular season.
///
/// The three percentage fields are fractions in `[0, 1]`; they are only
/// turned into percentages when rendered (see [`crate::format`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub field_goal_pct: f64,
    pub three_point_pct: f64,
    pub free_throw_pct: f64,
    pub games_played: Option<u32>,
}

// ---------------------------------------------------------------------------
// Team media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMedia {
    pub display_name: String,
    pub logo_image_ref: String,
    pub arena_image_ref: String,
    pub stadium_name: Option<String>,
}
