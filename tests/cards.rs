use std::fs;
use std::path::PathBuf;

use tahmin_terminal::card::{PredictionState, ResultState, build_match_card};
use tahmin_terminal::feed::{Feed, parse_feed_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_feed() -> Feed {
    parse_feed_json(&read_fixture("feed_basic.json")).expect("fixture should parse")
}

fn card_for(feed: &Feed, id: &str) -> tahmin_terminal::card::MatchCard {
    let m = feed
        .matches
        .iter()
        .find(|m| m.id == id)
        .expect("match should exist");
    build_match_card(m, feed)
}

fn cell_state(card: &tahmin_terminal::card::MatchCard, name: &str) -> (String, PredictionState) {
    let cell = card
        .predictions
        .iter()
        .find(|c| c.name == name)
        .expect("cell for every participant");
    (cell.value.clone(), cell.state)
}

#[test]
fn home_win_card() {
    let feed = fixture_feed();
    let card = card_for(&feed, "1");
    assert_eq!(card.left.name, "Galatasaray");
    assert_eq!(card.right.name, "Fenerbahçe");
    assert_eq!(card.left.logo, "https://img.example.org/logos/galatasaray.png");
    assert_eq!(card.result, ResultState::Win);
    assert_eq!(card.score, "2-1");
    assert_eq!(card.date, "09/08/2025");
    assert_eq!(card.weekday, "Cumartesi");
    assert_eq!(card.time, "20:00");
    assert_eq!(card.predictions.len(), feed.participants.len());
    assert_eq!(cell_state(&card, "Ali"), ("W".to_string(), PredictionState::Correct));
    assert_eq!(cell_state(&card, "Cem"), ("L".to_string(), PredictionState::Incorrect));
    assert_eq!(cell_state(&card, "Deniz"), ("-".to_string(), PredictionState::Pending));
    assert_eq!(card.correct_count(), 2);
}

#[test]
fn away_card_puts_tracked_team_right() {
    let feed = fixture_feed();
    let card = card_for(&feed, "2");
    assert_eq!(card.left.name, "Beşiktaş");
    assert_eq!(card.right.name, "Galatasaray");
    assert_eq!(card.result, ResultState::Loss);
    assert_eq!(cell_state(&card, "Ali").1, PredictionState::Correct);
    assert_eq!(cell_state(&card, "Bora").1, PredictionState::Incorrect);
}

#[test]
fn draw_and_missing_prediction() {
    let feed = fixture_feed();
    let card = card_for(&feed, "3");
    assert_eq!(card.result, ResultState::Draw);
    assert_eq!(cell_state(&card, "Cem"), ("-".to_string(), PredictionState::Pending));
}

#[test]
fn malformed_result_renders_as_pending() {
    let feed = fixture_feed();
    let card = card_for(&feed, "4");
    assert_eq!(card.result, ResultState::Pending);
    assert!(!card.is_completed());
    assert_eq!(card.score, "vs");
    assert_eq!(card.time, "TBD");
    assert_eq!(cell_state(&card, "Ali"), ("W".to_string(), PredictionState::Pending));
    // Kasımpaşa has no entry in the team mapping.
    assert_eq!(card.right.name, "Galatasaray");
    assert_eq!(card.left.name, "Kasımpaşa");
    assert_eq!(card.left.logo, "");
}

#[test]
fn unplayed_matches_are_pending() {
    let feed = fixture_feed();
    for id in ["5", "7"] {
        let card = card_for(&feed, id);
        assert_eq!(card.result, ResultState::Pending);
        assert_eq!(card.score, "vs");
        assert!(card.predictions.iter().all(|c| c.state == PredictionState::Pending));
    }
}
