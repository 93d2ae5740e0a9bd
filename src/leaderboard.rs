use crate::feed::{Match, Participant};
use crate::scoring::{ParticipantStats, compute_stats};

const RANK_BADGES: [&str; 5] = ["🥇", "🥈", "🥉", "🎖", "🏅"];
const RANK_BADGE_FALLBACK: &str = "⚽";

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub position: usize,
    pub stats: ParticipantStats,
}

impl RankedEntry {
    pub fn badge(&self) -> &'static str {
        rank_badge(self.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub top: Option<RankedEntry>,
    pub rest: Vec<RankedEntry>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn len(&self) -> usize {
        self.rest.len() + usize::from(self.top.is_some())
    }
}

/// Points descending, then name ascending.
pub fn rank(stats: Vec<ParticipantStats>) -> Vec<RankedEntry> {
    let mut sorted = stats;
    sorted.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, stats)| RankedEntry {
            position: idx + 1,
            stats,
        })
        .collect()
}

pub fn rank_badge(position: usize) -> &'static str {
    match position {
        1..=5 => RANK_BADGES[position - 1],
        _ => RANK_BADGE_FALLBACK,
    }
}

pub fn split_top(ranked: Vec<RankedEntry>) -> Leaderboard {
    let mut iter = ranked.into_iter();
    let top = iter.next();
    Leaderboard {
        top,
        rest: iter.collect(),
    }
}

pub fn build_leaderboard(matches: &[Match], participants: &[Participant]) -> Leaderboard {
    split_top(rank(compute_stats(matches, participants)))
}

pub fn accuracy_is_good(accuracy: f64) -> bool {
    accuracy >= 50.0
}

pub fn format_accuracy(accuracy: f64) -> String {
    format!("{accuracy:.1}%")
}

pub fn correct_label(stats: &ParticipantStats) -> String {
    format!("{}/{} doğru", stats.correct, stats.total)
}

pub fn rest_toggle_label(rest_visible: bool) -> &'static str {
    if rest_visible {
        "futbol cahillerini gizle"
    } else {
        "diğerleri"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(name: &str, correct: u32, total: u32) -> ParticipantStats {
        ParticipantStats {
            name: name.to_string(),
            points: correct * 3,
            correct,
            total,
            accuracy: crate::scoring::accuracy(correct, total),
        }
    }

    #[test]
    fn badges_are_distinct_for_top_five() {
        let badges: Vec<&str> = (1..=5).map(rank_badge).collect();
        for (i, a) in badges.iter().enumerate() {
            for b in &badges[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(*a, rank_badge(6));
        }
        assert_eq!(rank_badge(6), rank_badge(42));
        assert_eq!(rank_badge(0), RANK_BADGE_FALLBACK);
        assert_eq!(
            [rank_badge(4), rank_badge(5), rank_badge(6)],
            ["🎖", "🏅", "⚽"]
        );
    }

    #[test]
    fn top_is_split_from_rest() {
        let board = split_top(rank(vec![stats("Cem", 1, 2), stats("Ali", 3, 4)]));
        assert_eq!(board.top.as_ref().map(|e| e.stats.name.as_str()), Some("Ali"));
        assert_eq!(board.rest.len(), 1);
        assert_eq!(board.rest[0].position, 2);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn empty_board() {
        let board = split_top(Vec::new());
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn accuracy_formatting() {
        assert_eq!(format_accuracy(66.6666), "66.7%");
        assert_eq!(format_accuracy(0.0), "0.0%");
        assert!(accuracy_is_good(50.0));
        assert!(!accuracy_is_good(49.9));
        assert_eq!(correct_label(&stats("A", 2, 4)), "2/4 doğru");
    }
}
