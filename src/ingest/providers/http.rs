// src/ingest/providers/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ingest::dialect::parse_feed;
use crate::ingest::types::{FeedSource, NewsItem};

/// Per-request socket timeout; a dead feed blocks the run for at most this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const USER_AGENT: &str = "NewsStockCurator/1.0 (Rust)";

pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("building http client")
}

/// A feed downloaded over HTTP(S) and parsed by dialect.
pub struct HttpFeed {
    name: String,
    url: String,
    client: Client,
}

impl HttpFeed {
    pub fn new(name: &str, url: &str, client: Client) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_items(&self) -> Result<Vec<NewsItem>> {
        let t0 = std::time::Instant::now();
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("{} http get({})", self.name, self.url))?
            .error_for_status()
            .with_context(|| format!("{} http status", self.name))?
            .text()
            .await
            .with_context(|| format!("{} http .text()", self.name))?;

        let items = parse_feed(&self.name, &body)?;
        tracing::debug!(
            source = %self.name,
            items = items.len(),
            ms = t0.elapsed().as_millis() as u64,
            "http feed parsed"
        );
        Ok(items)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
