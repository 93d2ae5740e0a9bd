use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::feed::Match;

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
}

/// Kickoff of a match; a missing or unreadable time counts as the start of the day.
pub fn kickoff(m: &Match) -> Option<NaiveDateTime> {
    let date = parse_date(&m.date)?;
    let time = m
        .time
        .as_deref()
        .and_then(parse_time)
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

fn cmp_kickoff(a: &Match, b: &Match) -> Ordering {
    match (kickoff(a), kickoff(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Tracked-team matches in chronological order. Matches sharing a kickoff keep
/// their feed order, so identical input always yields the same sequence.
pub fn build_match_list(matches: &[Match], tracked_team: &str) -> Vec<Match> {
    let mut sorted: Vec<&Match> = matches.iter().collect();
    sorted.sort_by(|a, b| cmp_kickoff(a, b));

    let mut by_date: BTreeMap<&str, Vec<&Match>> = BTreeMap::new();
    for m in sorted {
        let day = by_date.entry(m.date.as_str()).or_default();
        if m.team == tracked_team {
            day.push(m);
        }
    }

    by_date
        .into_values()
        .flatten()
        .cloned()
        .collect()
}
