use chrono::{Datelike, Weekday};

use crate::feed::{Feed, Match, Team};
use crate::match_list::parse_date;
use crate::scoring::{Outcome, classify, parse_score};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
    Pending,
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionState {
    Pending,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionCell {
    pub name: String,
    /// Prediction letter, or `-` when the participant skipped this match.
    pub value: String,
    pub state: PredictionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub match_id: String,
    pub left: Team,
    pub right: Team,
    pub score: String,
    pub result: ResultState,
    pub date: String,
    pub weekday: String,
    pub time: String,
    pub predictions: Vec<PredictionCell>,
}

impl MatchCard {
    pub fn is_completed(&self) -> bool {
        self.result != ResultState::Pending
    }

    pub fn logos(&self) -> [&str; 2] {
        [self.left.logo.as_str(), self.right.logo.as_str()]
    }

    pub fn correct_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.state == PredictionState::Correct)
            .count()
    }
}

pub fn build_match_card(m: &Match, feed: &Feed) -> MatchCard {
    let tracked = Team {
        name: m.team.clone(),
        logo: feed.team_or_fallback(&m.team).logo,
    };
    let opponent = Team {
        name: m.opponent.clone(),
        logo: feed.team_or_fallback(&m.opponent).logo,
    };
    let (left, right) = if m.home {
        (tracked, opponent)
    } else {
        (opponent, tracked)
    };

    let parsed = m.result.as_deref().and_then(parse_score);
    let outcome = parsed.map(|(h, a)| classify(h, a, m.home));
    let result = match outcome {
        None => ResultState::Pending,
        Some(Outcome::Win) => ResultState::Win,
        Some(Outcome::Loss) => ResultState::Loss,
        Some(Outcome::Draw) => ResultState::Draw,
    };
    let score = match (parsed, m.result.as_deref()) {
        (Some(_), Some(raw)) => raw.to_string(),
        _ => "vs".to_string(),
    };

    let predictions = feed
        .participants
        .iter()
        .map(|person| {
            let prediction = person.prediction_for(&m.id);
            let state = match (outcome, prediction) {
                (Some(o), Some(p)) if Outcome::from_letter(p) == Some(o) => {
                    PredictionState::Correct
                }
                (Some(_), Some(_)) => PredictionState::Incorrect,
                _ => PredictionState::Pending,
            };
            PredictionCell {
                name: person.name.clone(),
                value: prediction.unwrap_or("-").to_string(),
                state,
            }
        })
        .collect();

    MatchCard {
        match_id: m.id.clone(),
        left,
        right,
        score,
        result,
        date: format_date_european(&m.date),
        weekday: turkish_weekday(&m.date).unwrap_or_default().to_string(),
        time: m.time.clone().unwrap_or_else(|| "TBD".to_string()),
        predictions,
    }
}

/// `2025-08-09` -> `09/08/2025`. Unreadable dates are shown as given.
pub fn format_date_european(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

pub fn turkish_weekday(raw: &str) -> Option<&'static str> {
    let date = parse_date(raw)?;
    Some(match date.weekday() {
        Weekday::Sun => "Pazar",
        Weekday::Mon => "Pazartesi",
        Weekday::Tue => "Salı",
        Weekday::Wed => "Çarşamba",
        Weekday::Thu => "Perşembe",
        Weekday::Fri => "Cuma",
        Weekday::Sat => "Cumartesi",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn european_date() {
        assert_eq!(format_date_european("2025-08-09"), "09/08/2025");
        assert_eq!(format_date_european("TBA"), "TBA");
    }

    #[test]
    fn weekday_names() {
        // 2025-08-09 was a Saturday.
        assert_eq!(turkish_weekday("2025-08-09"), Some("Cumartesi"));
        assert_eq!(turkish_weekday("2025-08-10"), Some("Pazar"));
        assert_eq!(turkish_weekday("nope"), None);
    }
}
