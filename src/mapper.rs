//! Provider wire records → display records.
//!
//! Everything here is a pure function: no I/O, no clock reads. Identical
//! input yields identical output, which keeps the mapping testable and
//! leaves the door open for a caching layer in front of it.

use chrono::{Datelike, NaiveDate};

use crate::model::display::{
    MatchCard, MatchStatus, PlayerCard, SeriesCard, SeriesStatus, StatusFilter, TeamBlock,
};
use crate::model::provider::{ProviderInnings, ProviderMatch, ProviderPlayer, ProviderSeries};

/// Build the display card for one provider match record.
pub fn match_card(m: &ProviderMatch) -> MatchCard {
    MatchCard {
        id: m.id.clone(),
        title: m.name.clone(),
        format: m.match_type.clone(),
        venue: m.venue.clone(),
        date: m.date.clone(),
        series: m.series.clone(),
        series_id: m.series_id.clone(),
        status: normalize_status(m),
        result: m.status.clone(),
        teams: m.teams.iter().map(|name| team_block(m, name)).collect(),
    }
}

/// Lifecycle flags win over free-text status parsing: the provider's
/// `status` line is display copy, not a state machine.
pub fn normalize_status(m: &ProviderMatch) -> MatchStatus {
    if m.match_ended.unwrap_or(false) {
        MatchStatus::Finished
    } else if m.match_started.unwrap_or(false) {
        MatchStatus::Live
    } else {
        MatchStatus::Upcoming
    }
}

fn team_block(m: &ProviderMatch, name: &str) -> TeamBlock {
    let info = m
        .team_info
        .iter()
        .find(|t| t.name.as_deref() == Some(name));
    // A team's line comes from its first innings entry; labels look like
    // "India Inning 1".
    let innings = m
        .score
        .iter()
        .find(|s| s.inning.as_deref().is_some_and(|label| label.contains(name)));

    TeamBlock {
        name: name.to_string(),
        short_name: info.and_then(|t| t.shortname.clone()),
        logo_url: info.and_then(|t| t.img.clone()),
        score: innings.and_then(format_score),
        overs: innings.and_then(format_overs),
    }
}

fn format_score(innings: &ProviderInnings) -> Option<String> {
    let runs = innings.runs?;
    Some(match innings.wickets {
        Some(wickets) => format!("{runs}/{wickets}"),
        None => runs.to_string(),
    })
}

fn format_overs(innings: &ProviderInnings) -> Option<String> {
    innings.overs.map(|o| {
        if o.fract() == 0.0 {
            format!("{o:.0}")
        } else {
            format!("{o}")
        }
    })
}

/// Build the display card for one provider series record.
///
/// `today` is an explicit argument so status classification stays
/// deterministic; controllers pass the current date.
pub fn series_card(s: &ProviderSeries, today: NaiveDate) -> SeriesCard {
    let start = s.start_date.as_deref().and_then(parse_provider_date);
    let end = s.end_date.as_deref().and_then(parse_provider_date);

    let status = match (start, end) {
        (Some(start), _) if start > today => SeriesStatus::Upcoming,
        (_, Some(end)) if end < today => SeriesStatus::Completed,
        _ => SeriesStatus::Ongoing,
    };

    let mut formats = Vec::new();
    for (count, label) in [(s.test, "Test"), (s.odi, "ODI"), (s.t20, "T20")] {
        if let Some(n) = count.filter(|&n| n > 0) {
            formats.push(format!("{n} {label}"));
        }
    }

    SeriesCard {
        id: s.id.clone(),
        name: s.name.clone(),
        year: start.map(|d| d.year()),
        country: s.country.clone(),
        formats,
        status,
        team_count: s.squads.unwrap_or(0),
        match_count: s.matches.unwrap_or(0),
    }
}

/// The provider sends ISO dates on full records and loose labels ("Jun 29")
/// elsewhere; only the ISO form is classifiable.
fn parse_provider_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn player_card(p: &ProviderPlayer) -> PlayerCard {
    PlayerCard {
        id: p.id.clone(),
        name: p.name.clone(),
        country: p.country.clone(),
        role: p.role.clone(),
        batting_style: p.batting_style.clone(),
        bowling_style: p.bowling_style.clone(),
        place_of_birth: p.place_of_birth.clone(),
        date_of_birth: p.date_of_birth.clone(),
    }
}

/// Apply the `?status=` filter. Unknown values yield the empty set rather
/// than an error; `all` passes everything through.
pub fn filter_by_status(cards: Vec<MatchCard>, raw: &str) -> Vec<MatchCard> {
    let wanted = match StatusFilter::parse(raw) {
        Some(StatusFilter::All) => return cards,
        Some(StatusFilter::Live) => MatchStatus::Live,
        Some(StatusFilter::Upcoming) => MatchStatus::Upcoming,
        Some(StatusFilter::Finished) => MatchStatus::Finished,
        None => return Vec::new(),
    };
    cards.into_iter().filter(|c| c.status == wanted).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::provider::ProviderTeamInfo;

    fn live_match() -> ProviderMatch {
        ProviderMatch {
            id: "m1".into(),
            name: "India vs Australia, 1st ODI".into(),
            match_type: Some("odi".into()),
            status: Some("India opt to bat".into()),
            venue: Some("Wankhede Stadium, Mumbai".into()),
            date: Some("2026-08-06".into()),
            teams: vec!["India".into(), "Australia".into()],
            team_info: vec![
                ProviderTeamInfo {
                    name: Some("India".into()),
                    shortname: Some("IND".into()),
                    img: Some("https://example.com/ind.png".into()),
                },
                ProviderTeamInfo {
                    name: Some("Australia".into()),
                    shortname: Some("AUS".into()),
                    img: None,
                },
            ],
            score: vec![ProviderInnings {
                runs: Some(245),
                wickets: Some(6),
                overs: Some(48.3),
                inning: Some("India Inning 1".into()),
            }],
            series: Some("Australia tour of India".into()),
            series_id: Some("s1".into()),
            match_started: Some(true),
            match_ended: Some(false),
        }
    }

    fn upcoming_match() -> ProviderMatch {
        ProviderMatch {
            id: "m2".into(),
            name: "India vs Australia, 2nd ODI".into(),
            match_type: Some("odi".into()),
            status: Some("Match not started".into()),
            venue: None,
            date: None,
            teams: vec!["India".into(), "Australia".into()],
            team_info: vec![],
            score: vec![],
            series: None,
            series_id: Some("s1".into()),
            match_started: Some(false),
            match_ended: Some(false),
        }
    }

    #[test]
    fn test_live_match_maps_score_and_overs() {
        let card = match_card(&live_match());
        assert_eq!(card.status, MatchStatus::Live);
        assert_eq!(card.teams.len(), 2);
        assert_eq!(card.teams[0].score.as_deref(), Some("245/6"));
        assert_eq!(card.teams[0].overs.as_deref(), Some("48.3"));
        assert_eq!(card.teams[0].short_name.as_deref(), Some("IND"));
        // Australia has not batted: the slot stays empty, no "0/0" artifact.
        assert_eq!(card.teams[1].score, None);
        assert_eq!(card.teams[1].overs, None);
    }

    #[test]
    fn test_upcoming_match_has_no_score_artifacts() {
        let card = match_card(&upcoming_match());
        assert_eq!(card.status, MatchStatus::Upcoming);
        assert!(card.teams.iter().all(|t| t.score.is_none()));
        assert!(card.teams.iter().all(|t| t.overs.is_none()));
        assert_eq!(card.result.as_deref(), Some("Match not started"));
    }

    #[test]
    fn test_finished_flag_wins_over_started_flag() {
        let mut m = live_match();
        m.match_ended = Some(true);
        assert_eq!(normalize_status(&m), MatchStatus::Finished);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let m = live_match();
        assert_eq!(match_card(&m), match_card(&m));
    }

    #[test]
    fn test_whole_overs_render_without_fraction() {
        let innings = ProviderInnings {
            runs: Some(312),
            wickets: Some(4),
            overs: Some(50.0),
            inning: Some("India Inning 1".into()),
        };
        assert_eq!(format_overs(&innings).as_deref(), Some("50"));
    }

    #[test]
    fn test_score_without_wickets_is_runs_only() {
        let innings = ProviderInnings {
            runs: Some(10),
            wickets: None,
            overs: None,
            inning: Some("India Inning 1".into()),
        };
        assert_eq!(format_score(&innings).as_deref(), Some("10"));
    }

    #[test]
    fn test_filter_selects_matching_status_case_insensitively() {
        let cards = vec![match_card(&live_match()), match_card(&upcoming_match())];
        let filtered = filter_by_status(cards, "UPCOMING");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "m2");
        assert!(filtered[0].teams.iter().all(|t| t.score.is_none()));
    }

    #[test]
    fn test_filter_unknown_value_yields_empty_set() {
        let cards = vec![match_card(&live_match()), match_card(&upcoming_match())];
        assert!(filter_by_status(cards, "abandoned").is_empty());
    }

    #[test]
    fn test_filter_all_passes_everything() {
        let cards = vec![match_card(&live_match()), match_card(&upcoming_match())];
        assert_eq!(filter_by_status(cards, "all").len(), 2);
    }

    fn series(start: &str, end: &str) -> ProviderSeries {
        ProviderSeries {
            id: "s1".into(),
            name: "Australia tour of India".into(),
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            country: Some("India".into()),
            odi: Some(3),
            t20: Some(0),
            test: Some(2),
            squads: Some(2),
            matches: Some(5),
        }
    }

    #[test]
    fn test_series_status_classification() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let s = series("2026-09-01", "2026-09-30");
        assert_eq!(series_card(&s, today).status, SeriesStatus::Upcoming);
        let s = series("2026-07-01", "2026-07-20");
        assert_eq!(series_card(&s, today).status, SeriesStatus::Completed);
        let s = series("2026-08-01", "2026-08-30");
        assert_eq!(series_card(&s, today).status, SeriesStatus::Ongoing);
    }

    #[test]
    fn test_series_card_formats_and_year() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let card = series_card(&series("2026-08-01", "2026-08-30"), today);
        assert_eq!(card.formats, vec!["2 Test".to_string(), "3 ODI".to_string()]);
        assert_eq!(card.year, Some(2026));
        assert_eq!(card.team_count, 2);
        assert_eq!(card.match_count, 5);
    }

    #[test]
    fn test_series_with_unparseable_dates_stays_ongoing() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let mut s = series("Aug 01", "Sep 30");
        s.start_date = Some("Aug 01".into());
        let card = series_card(&s, today);
        assert_eq!(card.status, SeriesStatus::Ongoing);
        assert_eq!(card.year, None);
    }
}
