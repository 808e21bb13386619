// src/ingest/providers/fixture.rs
use anyhow::Result;
use async_trait::async_trait;

use crate::ingest::dialect::parse_feed;
use crate::ingest::types::{FeedSource, NewsItem};

/// Feed backed by an in-memory XML document (tests, offline demos).
pub struct FixtureFeed {
    name: String,
    xml: String,
}

impl FixtureFeed {
    pub fn from_fixture(name: &str, xml: &str) -> Self {
        Self {
            name: name.to_string(),
            xml: xml.to_string(),
        }
    }

    /// Read the document from disk up front.
    pub fn from_path(name: &str, path: &std::path::Path) -> Result<Self> {
        use anyhow::Context;
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("reading feed fixture {}", path.display()))?;
        Ok(Self {
            name: name.to_string(),
            xml,
        })
    }
}

#[async_trait]
impl FeedSource for FixtureFeed {
    async fn fetch_items(&self) -> Result<Vec<NewsItem>> {
        parse_feed(&self.name, &self.xml)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
