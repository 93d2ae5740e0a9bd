use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tahmin_terminal::config::AppConfig;
use tahmin_terminal::feed::{Feed, Match, parse_feed_json};
use tahmin_terminal::lazy_load::TriggerOutcome;
use tahmin_terminal::state::{
    AppState, Delta, LoadingOverlay, SessionPhase, Wheel, apply_delta,
};
use tahmin_terminal::theme::Theme;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn long_feed(n: usize) -> Feed {
    Feed {
        matches: (0..n)
            .map(|i| Match {
                id: i.to_string(),
                team: "Galatasaray".to_string(),
                opponent: format!("Opp{i}"),
                home: true,
                date: format!("2025-08-{:02}", i + 1),
                time: None,
                result: None,
            })
            .collect(),
        ..Feed::default()
    }
}

#[test]
fn loaded_feed_fills_session_and_first_batch() {
    let mut state = AppState::default();
    let feed = parse_feed_json(&read_fixture("feed_basic.json")).expect("fixture should parse");
    let now = Instant::now();

    apply_delta(&mut state, Delta::FeedLoaded(feed), now);

    assert_eq!(state.session.phase, SessionPhase::Ready);
    assert_eq!(state.session.leaderboard.len(), 4);
    assert_eq!(state.session.match_list.len(), 6);
    assert!(!state.cards.skeleton);
    assert_eq!(state.cards.cards.len(), 6);
    // Kasımpaşa has no logo, every other side shows once.
    assert_eq!(state.cards.logos.len(), 6);
    assert!(state.logs.iter().any(|l| l.starts_with("[INFO] Feed loaded")));
}

#[test]
fn failed_fetch_leaves_content_empty() {
    let mut state = AppState::default();
    let now = Instant::now();
    apply_delta(&mut state, Delta::FeedFailed("connection refused".to_string()), now);

    assert!(matches!(state.session.phase, SessionPhase::Failed(_)));
    assert!(state.session.leaderboard.is_empty());
    assert!(state.cards.cards.is_empty());
    assert!(!state.cards.skeleton);
    assert!(state.loader.is_none());
    assert!(state.logs.iter().any(|l| l.contains("connection refused")));
}

#[test]
fn overlay_hides_after_fixed_delay_either_way() {
    for delta in [
        Delta::FeedLoaded(long_feed(3)),
        Delta::FeedFailed("boom".to_string()),
    ] {
        let mut state = AppState::default();
        let start = Instant::now();
        state.tick(start + Duration::from_secs(5));
        assert_eq!(state.overlay, LoadingOverlay::Visible);

        apply_delta(&mut state, delta, start);
        state.tick(start + Duration::from_millis(499));
        assert_eq!(state.overlay, LoadingOverlay::Visible);
        state.tick(start + Duration::from_millis(500));
        assert_eq!(state.overlay, LoadingOverlay::Hidden);
    }
}

#[test]
fn scrolling_near_the_end_loads_next_batch() {
    let mut state = AppState::default();
    apply_delta(&mut state, Delta::FeedLoaded(long_feed(13)), Instant::now());
    assert_eq!(state.cards.cards.len(), 10);

    state.set_match_viewport(4);
    assert_eq!(state.poll_lazy_load(), None);

    state.scroll_matches_bottom();
    assert_eq!(state.viewport_last(), 9);
    assert_eq!(state.poll_lazy_load(), Some(TriggerOutcome::Appended(3)));
    assert_eq!(state.cards.cards.len(), 13);

    state.scroll_matches_bottom();
    assert_eq!(state.poll_lazy_load(), None);
    assert_eq!(state.cards.cards.len(), 13);
}

#[test]
fn wheel_scrolls_one_card_per_notch_and_reaches_the_trigger() {
    let mut state = AppState::default();
    apply_delta(&mut state, Delta::FeedLoaded(long_feed(13)), Instant::now());
    state.set_match_viewport(4);

    state.on_wheel(Wheel::Up);
    assert_eq!(state.match_scroll, 0);

    for _ in 0..4 {
        state.on_wheel(Wheel::Down);
    }
    assert_eq!(state.match_scroll, 4);
    assert_eq!(state.poll_lazy_load(), None);

    state.on_wheel(Wheel::Down);
    assert_eq!(state.viewport_last(), 8);
    assert_eq!(state.poll_lazy_load(), Some(TriggerOutcome::Appended(3)));

    state.on_wheel(Wheel::Up);
    assert_eq!(state.match_scroll, 4);
}

#[test]
fn tall_viewport_keeps_loading_until_filled() {
    let mut state = AppState::default();
    apply_delta(&mut state, Delta::FeedLoaded(long_feed(20)), Instant::now());
    state.set_match_viewport(30);

    let mut rounds = 0;
    while let Some(TriggerOutcome::Appended(_)) = state.poll_lazy_load() {
        rounds += 1;
    }
    assert_eq!(rounds, 4);
    assert_eq!(state.cards.cards.len(), 20);
}

#[test]
fn theme_toggle_announces_then_expires() {
    let mut state = AppState::new(AppConfig::default(), Theme::Light);
    let now = Instant::now();
    assert_eq!(state.toggle_theme(now), Theme::Dark);
    let (msg, _) = state.announcement.clone().expect("announcement posted");
    assert_eq!(msg, "Theme switched to dark mode");

    state.tick(now + Duration::from_millis(900));
    assert!(state.announcement.is_some());
    state.tick(now + Duration::from_secs(1));
    assert!(state.announcement.is_none());

    assert_eq!(state.toggle_theme(now), Theme::Light);
}

#[test]
fn rest_list_toggles() {
    let mut state = AppState::default();
    assert!(!state.rest_visible);
    state.toggle_rest();
    assert!(state.rest_visible);
    state.toggle_rest();
    assert!(!state.rest_visible);
}
