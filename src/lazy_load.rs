use std::ops::Range;

use crate::card::{MatchCard, build_match_card};
use crate::feed::{Feed, Match};

pub const DEFAULT_INITIAL_BATCH: usize = 10;
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Where rendered cards go. The loader only ever appends.
pub trait CardSink {
    /// Drops skeleton content shown before real cards arrive.
    fn clear_placeholder(&mut self);
    fn append(&mut self, card: MatchCard);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Appended(usize),
    Busy,
    NotArmed,
    Exhausted,
}

/// Incremental card loader: an initial synchronous batch, then fixed-size
/// batches requested by a proximity trigger armed on the last rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyLoader {
    loaded: usize,
    total: usize,
    batch_size: usize,
    loading: bool,
    armed_on: Option<usize>,
}

impl LazyLoader {
    pub fn start<S: CardSink>(
        initial: usize,
        batch_size: usize,
        list: &[Match],
        feed: &Feed,
        sink: &mut S,
    ) -> Self {
        sink.clear_placeholder();
        let first = initial.min(list.len());
        for m in &list[..first] {
            sink.append(build_match_card(m, feed));
        }
        let mut loader = Self {
            loaded: first,
            total: list.len(),
            batch_size: batch_size.max(1),
            loading: false,
            armed_on: None,
        };
        loader.rearm(sink);
        loader
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.loaded >= self.total
    }

    /// Index of the card the proximity trigger is watching, if any.
    pub fn armed_on(&self) -> Option<usize> {
        self.armed_on
    }

    /// True when the watched card sits within `margin` cards past `viewport_last`.
    pub fn near_end(&self, viewport_last: usize, margin: usize) -> bool {
        match self.armed_on {
            Some(idx) => idx <= viewport_last.saturating_add(margin),
            None => false,
        }
    }

    /// Claims the next batch. Triggers that arrive while a batch is in flight,
    /// before re-arming, or after the list is exhausted are dropped.
    pub fn request_batch(&mut self) -> Option<Range<usize>> {
        if self.loading || self.armed_on.is_none() || self.is_exhausted() {
            return None;
        }
        self.loading = true;
        self.armed_on = None;
        let end = (self.loaded + self.batch_size).min(self.total);
        Some(self.loaded..end)
    }

    pub fn complete_batch<S: CardSink>(&mut self, appended: usize, sink: &S) {
        self.loaded = (self.loaded + appended).min(self.total);
        self.loading = false;
        self.rearm(sink);
    }

    pub fn on_trigger<S: CardSink>(
        &mut self,
        list: &[Match],
        feed: &Feed,
        sink: &mut S,
    ) -> TriggerOutcome {
        if self.is_exhausted() {
            return TriggerOutcome::Exhausted;
        }
        if self.loading {
            return TriggerOutcome::Busy;
        }
        let Some(range) = self.request_batch() else {
            return TriggerOutcome::NotArmed;
        };
        let mut appended = 0;
        for m in list.get(range).unwrap_or_default() {
            sink.append(build_match_card(m, feed));
            appended += 1;
        }
        self.complete_batch(appended, sink);
        TriggerOutcome::Appended(appended)
    }

    fn rearm<S: CardSink>(&mut self, sink: &S) {
        self.armed_on = if self.is_exhausted() || sink.is_empty() {
            None
        } else {
            Some(sink.len() - 1)
        };
    }
}
