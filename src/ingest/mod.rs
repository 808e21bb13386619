// src/ingest/mod.rs
pub mod config;
pub mod dates;
pub mod dialect;
pub mod providers;
pub mod types;

use crate::ingest::config::FeedRegistry;
use crate::ingest::providers::http::{build_client, HttpFeed};
use crate::ingest::types::{FeedSource, NewsItem};
use anyhow::{bail, Result};
use chrono::{Duration as ChronoDuration, NaiveDateTime};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::time::Duration;

/// Descriptions are cut to this many characters after HTML stripping.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Pause between two consecutive feed requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(300);

/// Strip HTML markup: decode entities, drop tags, collapse whitespace, trim.
pub fn strip_html(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Collapse whitespace (NBSP included)
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Keep at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}

/// Description as stored on a `NewsItem`: stripped, then capped at 500 chars.
pub fn clean_description(s: &str) -> String {
    truncate_chars(&strip_html(s), DESCRIPTION_MAX_CHARS)
}

/// Drop items older than `now - max_age_hours`, then sort newest first.
///
/// Undated items always survive the cutoff and sort after every dated item.
/// Equal timestamps keep their fetch order.
pub fn filter_and_sort(
    now: NaiveDateTime,
    max_age_hours: u32,
    items: Vec<NewsItem>,
) -> Vec<NewsItem> {
    let cutoff = now - ChronoDuration::hours(i64::from(max_age_hours));
    let mut kept: Vec<NewsItem> = items
        .into_iter()
        .filter(|it| it.published.map_or(true, |ts| ts >= cutoff))
        .collect();

    // `None < Some(_)`, so reversing the comparison puts undated items last.
    kept.sort_by(|a, b| b.published.cmp(&a.published));
    kept
}

/// Sequential fetcher over a fixed list of feed sources.
pub struct Fetcher {
    sources: Vec<Box<dyn FeedSource>>,
    delay: Duration,
}

impl Fetcher {
    pub fn new(sources: Vec<Box<dyn FeedSource>>) -> Self {
        Self {
            sources,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }

    /// One HTTP source per registry entry, all sharing a single client.
    pub fn from_registry(registry: &FeedRegistry) -> Result<Self> {
        let client = build_client()?;
        let sources = registry
            .feeds
            .iter()
            .map(|f| {
                Box::new(HttpFeed::new(&f.name, &f.url, client.clone())) as Box<dyn FeedSource>
            })
            .collect();
        Ok(Self::new(sources))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Fetch every source once, one after another. A failing source is logged
    /// and contributes nothing.
    pub async fn fetch_raw(&self) -> Vec<NewsItem> {
        let mut raw = Vec::new();
        for (i, src) in self.sources.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match src.fetch_items().await {
                Ok(mut items) => {
                    tracing::debug!(source = src.name(), count = items.len(), "feed fetched");
                    raw.append(&mut items);
                }
                Err(e) => {
                    tracing::warn!(error = ?e, source = src.name(), "feed skipped");
                }
            }
        }
        raw
    }

    /// Fetch, age-filter and sort using the current UTC time.
    pub async fn fetch_all(&self, max_age_hours: u32) -> Result<Vec<NewsItem>> {
        self.fetch_all_at(chrono::Utc::now().naive_utc(), max_age_hours)
            .await
    }

    /// Same as [`Fetcher::fetch_all`] with an explicit clock.
    ///
    /// Errors only when nothing at all is left, which callers treat as
    /// "network down".
    pub async fn fetch_all_at(
        &self,
        now: NaiveDateTime,
        max_age_hours: u32,
    ) -> Result<Vec<NewsItem>> {
        tracing::info!(sources = self.sources.len(), "fetching news");
        let raw = self.fetch_raw().await;
        let fetched = raw.len();
        let items = filter_and_sort(now, max_age_hours, raw);
        tracing::info!(
            fetched,
            kept = items.len(),
            max_age_hours,
            "news fetch finished"
        );
        if items.is_empty() {
            bail!(
                "no news fetched from {} feed(s); check the network connection",
                self.sources.len()
            );
        }
        Ok(items)
    }
}
