use std::env;
use std::time::Duration;

use crate::lazy_load::{DEFAULT_BATCH_SIZE, DEFAULT_INITIAL_BATCH};

pub const DEFAULT_FEED_SOURCE: &str = "data.json";
pub const DEFAULT_TRACKED_TEAM: &str = "Galatasaray";
const DEFAULT_LOADING_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// File path or http(s) URL of the feed document.
    pub feed_source: String,
    pub tracked_team: String,
    pub initial_batch: usize,
    pub batch_size: usize,
    pub loading_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_source: DEFAULT_FEED_SOURCE.to_string(),
            tracked_team: DEFAULT_TRACKED_TEAM.to_string(),
            initial_batch: DEFAULT_INITIAL_BATCH,
            batch_size: DEFAULT_BATCH_SIZE,
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            feed_source: text_env_or("FEED_SOURCE", DEFAULT_FEED_SOURCE),
            tracked_team: text_env_or("TRACKED_TEAM", DEFAULT_TRACKED_TEAM),
            initial_batch: num_env_or("INITIAL_BATCH", DEFAULT_INITIAL_BATCH).max(1),
            batch_size: num_env_or("BATCH_SIZE", DEFAULT_BATCH_SIZE).max(1),
            loading_delay: Duration::from_millis(
                num_env_or("LOADING_DELAY_MS", DEFAULT_LOADING_DELAY_MS).min(10_000),
            ),
        }
    }
}

fn text_env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn num_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}
