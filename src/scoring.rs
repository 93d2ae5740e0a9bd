use serde::{Deserialize, Serialize};

use crate::feed::{Match, Participant};

pub const POINTS_PER_CORRECT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn letter(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Draw => "D",
        }
    }

    pub fn from_letter(raw: &str) -> Option<Self> {
        match raw.trim() {
            "W" => Some(Outcome::Win),
            "L" => Some(Outcome::Loss),
            "D" => Some(Outcome::Draw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantStats {
    pub name: String,
    pub points: u32,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

/// Parses a `home-away` score such as `"2-1"`. Anything else is "not decided".
pub fn parse_score(result: &str) -> Option<(u32, u32)> {
    let (home, away) = result.trim().split_once('-')?;
    let home = home.trim().parse::<u32>().ok()?;
    let away = away.trim().parse::<u32>().ok()?;
    Some((home, away))
}

pub fn classify(home_goals: u32, away_goals: u32, tracked_is_home: bool) -> Outcome {
    let (team, opponent) = if tracked_is_home {
        (home_goals, away_goals)
    } else {
        (away_goals, home_goals)
    };
    if team > opponent {
        Outcome::Win
    } else if team < opponent {
        Outcome::Loss
    } else {
        Outcome::Draw
    }
}

pub fn match_outcome(m: &Match) -> Option<Outcome> {
    let (home, away) = parse_score(m.result.as_deref()?)?;
    Some(classify(home, away, m.home))
}

pub fn is_prediction_correct(prediction: &str, result: &str, home: bool) -> bool {
    let Some((h, a)) = parse_score(result) else {
        return false;
    };
    prediction.trim() == classify(h, a, home).letter()
}

pub fn accuracy(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(total) * 100.0
}

/// One stats record per participant, in input order. Only decided matches the
/// participant predicted are counted; unparseable results are skipped.
pub fn compute_stats(matches: &[Match], participants: &[Participant]) -> Vec<ParticipantStats> {
    let decided: Vec<(&str, Outcome)> = matches
        .iter()
        .filter_map(|m| match_outcome(m).map(|o| (m.id.as_str(), o)))
        .collect();

    participants
        .iter()
        .map(|person| {
            let mut correct = 0u32;
            let mut total = 0u32;
            for (id, outcome) in &decided {
                let Some(prediction) = person.prediction_for(id) else {
                    continue;
                };
                total += 1;
                if Outcome::from_letter(prediction) == Some(*outcome) {
                    correct += 1;
                }
            }
            ParticipantStats {
                name: person.name.clone(),
                points: correct * POINTS_PER_CORRECT,
                correct,
                total,
                accuracy: accuracy(correct, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_parsing_tolerates_spaces_only() {
        assert_eq!(parse_score("2-1"), Some((2, 1)));
        assert_eq!(parse_score(" 3 - 0 "), Some((3, 0)));
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("2-"), None);
        assert_eq!(parse_score("-1"), None);
        assert_eq!(parse_score("2:1"), None);
    }

    #[test]
    fn classify_follows_tracked_side() {
        assert_eq!(classify(2, 1, true), Outcome::Win);
        assert_eq!(classify(1, 1, true), Outcome::Draw);
        assert_eq!(classify(2, 1, false), Outcome::Loss);
        assert_eq!(classify(0, 3, false), Outcome::Win);
    }

    #[test]
    fn accuracy_handles_zero_total() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(2, 4), 50.0);
    }

    #[test]
    fn prediction_letters_round_trip() {
        for o in [Outcome::Win, Outcome::Loss, Outcome::Draw] {
            assert_eq!(Outcome::from_letter(o.letter()), Some(o));
        }
        assert_eq!(Outcome::from_letter("X"), None);
    }
}
