use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use crate::card::MatchCard;
use crate::config::AppConfig;
use crate::feed::{Feed, Match};
use crate::lazy_load::{CardSink, LazyLoader, TriggerOutcome};
use crate::leaderboard::{Leaderboard, build_leaderboard};
use crate::match_list::build_match_list;
use crate::theme::Theme;

/// Extra cards past the viewport that still count as "near" (a one-card lookahead).
pub const PROXIMITY_MARGIN: usize = 1;
pub const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(1);
const MAX_LOGS: usize = 200;
/// Cards moved per mouse-wheel notch.
pub const WHEEL_STEP: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    Failed(String),
}

/// Owns the feed for the lifetime of the run, plus everything derived from it.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: SessionPhase,
    pub feed: Option<Feed>,
    pub leaderboard: Leaderboard,
    pub match_list: Vec<Match>,
    pub settled_at: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Loading,
            feed: None,
            leaderboard: Leaderboard::default(),
            match_list: Vec::new(),
            settled_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn finish_loaded(&mut self, feed: Feed, tracked_team: &str, now: Instant) {
        self.leaderboard = build_leaderboard(&feed.matches, &feed.participants);
        self.match_list = build_match_list(&feed.matches, tracked_team);
        self.feed = Some(feed);
        self.phase = SessionPhase::Ready;
        self.settled_at = Some(now);
    }

    pub fn finish_failed(&mut self, err: impl Into<String>, now: Instant) {
        self.feed = None;
        self.leaderboard = Leaderboard::default();
        self.match_list.clear();
        self.phase = SessionPhase::Failed(err.into());
        self.settled_at = Some(now);
    }
}

/// Rendered match cards. Starts out showing skeleton placeholders.
#[derive(Debug, Clone)]
pub struct CardList {
    pub cards: Vec<MatchCard>,
    pub skeleton: bool,
    pub logos: HashSet<String>,
}

impl Default for CardList {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            skeleton: true,
            logos: HashSet::new(),
        }
    }
}

impl CardSink for CardList {
    fn clear_placeholder(&mut self) {
        if self.skeleton {
            self.cards.clear();
            self.skeleton = false;
        }
    }

    fn append(&mut self, card: MatchCard) {
        for logo in card.logos() {
            if !logo.is_empty() && !self.logos.contains(logo) {
                self.logos.insert(logo.to_string());
            }
        }
        self.cards.push(card);
    }

    fn len(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingOverlay {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub enum Delta {
    FeedLoaded(Feed),
    FeedFailed(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub cards: CardList,
    pub loader: Option<LazyLoader>,
    pub match_scroll: usize,
    pub match_viewport: usize,
    pub rest_visible: bool,
    pub theme: Theme,
    pub announcement: Option<(String, Instant)>,
    pub overlay: LoadingOverlay,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default(), Theme::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig, theme: Theme) -> Self {
        Self {
            config,
            session: Session::new(),
            cards: CardList::default(),
            loader: None,
            match_scroll: 0,
            match_viewport: 0,
            rest_visible: false,
            theme,
            announcement: None,
            overlay: LoadingOverlay::Visible,
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Dismisses the loading overlay a fixed delay after the fetch settles and
    /// expires the theme announcement.
    pub fn tick(&mut self, now: Instant) {
        if self.overlay == LoadingOverlay::Visible
            && let Some(settled) = self.session.settled_at
            && now.duration_since(settled) >= self.config.loading_delay
        {
            self.overlay = LoadingOverlay::Hidden;
        }
        if let Some((_, at)) = &self.announcement
            && now.duration_since(*at) >= ANNOUNCEMENT_TTL
        {
            self.announcement = None;
        }
    }

    pub fn toggle_theme(&mut self, now: Instant) -> Theme {
        self.theme = self.theme.toggled();
        self.announcement = Some((self.theme.announcement(), now));
        self.theme
    }

    pub fn toggle_rest(&mut self) {
        self.rest_visible = !self.rest_visible;
    }

    pub fn set_match_viewport(&mut self, visible_cards: usize) {
        self.match_viewport = visible_cards;
        self.clamp_match_scroll();
    }

    pub fn scroll_matches_down(&mut self, by: usize) {
        self.match_scroll = self.match_scroll.saturating_add(by);
        self.clamp_match_scroll();
    }

    pub fn scroll_matches_up(&mut self, by: usize) {
        self.match_scroll = self.match_scroll.saturating_sub(by);
    }

    pub fn on_wheel(&mut self, wheel: Wheel) {
        match wheel {
            Wheel::Up => self.scroll_matches_up(WHEEL_STEP),
            Wheel::Down => self.scroll_matches_down(WHEEL_STEP),
        }
    }

    pub fn scroll_matches_top(&mut self) {
        self.match_scroll = 0;
    }

    pub fn scroll_matches_bottom(&mut self) {
        self.match_scroll = self.cards.len();
        self.clamp_match_scroll();
    }

    fn clamp_match_scroll(&mut self) {
        let max_start = self.cards.len().saturating_sub(self.match_viewport.max(1));
        self.match_scroll = self.match_scroll.min(max_start);
    }

    /// Index of the last card inside the visible match area.
    pub fn viewport_last(&self) -> usize {
        self.match_scroll + self.match_viewport.saturating_sub(1)
    }

    /// Proximity check: appends the next batch when the watched card is near
    /// the visible area. Returns `None` when nothing was triggered.
    pub fn poll_lazy_load(&mut self) -> Option<TriggerOutcome> {
        let viewport_last = self.viewport_last();
        let loader = self.loader.as_mut()?;
        let feed = self.session.feed.as_ref()?;
        if self.match_viewport == 0 || !loader.near_end(viewport_last, PROXIMITY_MARGIN) {
            return None;
        }
        let outcome = loader.on_trigger(&self.session.match_list, feed, &mut self.cards);
        let (loaded, total) = (loader.loaded(), loader.total());
        if let TriggerOutcome::Appended(n) = outcome {
            self.push_log(format!("[INFO] Loaded {n} more matches ({loaded}/{total})"));
        }
        Some(outcome)
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::FeedLoaded(feed) => {
            let (matches, people) = (feed.matches.len(), feed.participants.len());
            state
                .session
                .finish_loaded(feed, &state.config.tracked_team, now);
            state.cards = CardList::default();
            state.match_scroll = 0;
            state.loader = state.session.feed.as_ref().map(|feed| {
                LazyLoader::start(
                    state.config.initial_batch,
                    state.config.batch_size,
                    &state.session.match_list,
                    feed,
                    &mut state.cards,
                )
            });
            state.push_log(format!(
                "[INFO] Feed loaded: {matches} matches, {people} participants, {} tracked",
                state.session.match_list.len()
            ));
        }
        Delta::FeedFailed(err) => {
            state.push_log(format!("[WARN] Error loading data: {err}"));
            state.session.finish_failed(err, now);
            state.cards.clear_placeholder();
            state.loader = None;
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
