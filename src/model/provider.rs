use serde::Deserialize;

/// A match as the provider sends it.
///
/// Wire-only type: everything the provider may omit is an `Option`, and the
/// mapper decides what an absent field means for display.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMatch {
    pub id: String,
    /// e.g. "India vs Australia, 3rd ODI"
    pub name: String,
    /// "odi" | "t20" | "test" | ...
    pub match_type: Option<String>,
    /// Free-text progress/result line, e.g. "India won by 5 wickets"
    pub status: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    /// Team names in display order
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub team_info: Vec<ProviderTeamInfo>,
    /// One entry per innings played so far; empty before the first ball
    #[serde(default)]
    pub score: Vec<ProviderInnings>,
    pub series: Option<String>,
    #[serde(rename = "series_id")]
    pub series_id: Option<String>,
    pub match_started: Option<bool>,
    pub match_ended: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTeamInfo {
    pub name: Option<String>,
    pub shortname: Option<String>,
    pub img: Option<String>,
}

/// One innings line. The provider keys these `r`/`w`/`o`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderInnings {
    #[serde(rename = "r")]
    pub runs: Option<i64>,
    #[serde(rename = "w")]
    pub wickets: Option<i64>,
    #[serde(rename = "o")]
    pub overs: Option<f64>,
    /// Innings label, e.g. "India Inning 1"
    pub inning: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSeries {
    pub id: String,
    pub name: String,
    /// ISO date when the provider has one, otherwise a loose label
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub country: Option<String>,
    pub odi: Option<i64>,
    pub t20: Option<i64>,
    pub test: Option<i64>,
    /// Number of participating squads
    pub squads: Option<i64>,
    /// Number of scheduled matches
    pub matches: Option<i64>,
}

/// `series_info` payload: the series record plus its match list.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBundle {
    pub info: ProviderSeries,
    #[serde(rename = "matchList", default)]
    pub match_list: Vec<ProviderMatch>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPlayer {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub place_of_birth: Option<String>,
    pub date_of_birth: Option<String>,
}
