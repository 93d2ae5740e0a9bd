use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::feed::{Feed, parse_feed_json};
use crate::http_client::http_client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(String),
    Url(String),
}

impl FeedSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            FeedSource::Url(trimmed.to_string())
        } else {
            FeedSource::File(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FeedSource::File(path) => path,
            FeedSource::Url(url) => url,
        }
    }
}

pub fn fetch_feed_body(source: &FeedSource) -> Result<String> {
    match source {
        FeedSource::File(path) => fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed reading feed file {path}")),
        FeedSource::Url(url) => {
            let client = http_client()?;
            let resp = client.get(url).send().context("feed request failed")?;
            let status = resp.status();
            let body = resp.text().context("failed reading feed body")?;
            if !status.is_success() {
                return Err(anyhow::anyhow!("http {}: {}", status, body));
            }
            Ok(body)
        }
    }
}

pub fn load_feed(source: &FeedSource) -> Result<Feed> {
    let body = fetch_feed_body(source)?;
    parse_feed_json(&body).with_context(|| format!("feed at {}", source.label()))
}
