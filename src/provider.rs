use std::sync::mpsc::Sender;
use std::thread;

use crate::feed_source::{FeedSource, load_feed};
use crate::state::Delta;

/// Loads the feed once on a worker thread and reports back over `tx`.
pub fn spawn_feed_loader(tx: Sender<Delta>, source: FeedSource) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Fetching feed from {}",
            source.label()
        )));
        match load_feed(&source) {
            Ok(feed) => {
                let _ = tx.send(Delta::FeedLoaded(feed));
            }
            Err(err) => {
                let _ = tx.send(Delta::FeedFailed(format!("{err:#}")));
            }
        }
    })
}
