use serde::Serialize;

/// Normalized match state shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Live,
    Upcoming,
    Finished,
}

/// `?status=` query value for match listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Live,
    Upcoming,
    Finished,
}

impl StatusFilter {
    /// Case-insensitive parse. Anything outside the known set is `None`;
    /// the caller turns that into an empty result set, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "live" => Some(StatusFilter::Live),
            "upcoming" => Some(StatusFilter::Upcoming),
            "finished" => Some(StatusFilter::Finished),
            _ => None,
        }
    }
}

/// One side of a match card. Score and overs stay `None` until the innings
/// exists; the front-end hides the slot rather than showing a fake "0/0".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBlock {
    pub name: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    /// "245/6" once the innings has runs on the board
    pub score: Option<String>,
    /// "48.3"
    pub overs: Option<String>,
}

/// Display-ready match record, decoupled from the provider schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCard {
    pub id: String,
    /// e.g. "India vs Australia, 3rd ODI"
    pub title: String,
    pub format: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub series: Option<String>,
    pub series_id: Option<String>,
    pub status: MatchStatus,
    /// The provider's human-readable result/progress line
    pub result: Option<String>,
    pub teams: Vec<TeamBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesStatus {
    Ongoing,
    Upcoming,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCard {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub country: Option<String>,
    /// e.g. ["3 ODI", "2 Test"]
    pub formats: Vec<String>,
    pub status: SeriesStatus,
    pub team_count: i64,
    pub match_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCard {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub place_of_birth: Option<String>,
    pub date_of_birth: Option<String>,
}
