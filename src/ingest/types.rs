// src/ingest/types.rs
use anyhow::Result;
use chrono::NaiveDateTime;

/// A raw article as it comes out of a feed, before any scoring.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub description: String, // HTML-stripped, at most 500 chars
    pub link: String,
    pub source: String,                   // feed label, e.g. "CNBC"
    pub published: Option<NaiveDateTime>, // UTC, tz-naive
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &str;
}
