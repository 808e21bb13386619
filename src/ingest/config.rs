// src/ingest/config.rs
//! Feed registry: ordered `source label -> URL` list.
//!
//! Lookup order:
//! 1) `$CURATOR_FEEDS_PATH`
//! 2) `config/feeds.toml`
//! 3) `config/feeds.json`
//! 4) built-in seed
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_FEEDS_PATH: &str = "CURATOR_FEEDS_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRegistry {
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

impl FeedRegistry {
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Built-in registry with Japanese and global business feeds.
    pub fn default_seed() -> Self {
        let feeds = [
            ("日経新聞", "https://www.nikkei.com/rss/main.xml"),
            ("ロイター日本語", "https://jp.reuters.com/rssFeed/topNews"),
            (
                "Bloomberg日本語",
                "https://www.bloomberg.co.jp/feeds/sitemap_news.xml",
            ),
            (
                "Reuters Business",
                "https://feeds.reuters.com/reuters/businessNews",
            ),
            ("Reuters World", "https://feeds.reuters.com/Reuters/worldNews"),
            (
                "CNBC",
                "https://www.cnbc.com/id/100003114/device/rss/rss.html",
            ),
            (
                "MarketWatch",
                "https://feeds.marketwatch.com/marketwatch/topstories/",
            ),
            ("Financial Times", "https://www.ft.com/rss/home"),
            ("Yahoo Finance", "https://finance.yahoo.com/news/rssindex"),
            ("BBC Business", "https://feeds.bbci.co.uk/news/business/rss.xml"),
            (
                "CNN Business",
                "http://rss.cnn.com/rss/money_news_international.rss",
            ),
        ]
        .into_iter()
        .map(|(name, url)| FeedEntry {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();
        Self { feeds }
    }
}

/// Load a registry from an explicit path. Supports TOML or JSON formats.
pub fn load_registry_from(path: &Path) -> Result<FeedRegistry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed registry from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_registry(&content, ext.as_str())
        .with_context(|| format!("parsing feed registry {}", path.display()))
}

/// Load the registry using env var + fallbacks (see module docs).
pub fn load_registry_default() -> Result<FeedRegistry> {
    if let Ok(p) = std::env::var(ENV_FEEDS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_registry_from(&pb);
        } else {
            return Err(anyhow!("{ENV_FEEDS_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_registry_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_registry_from(&json_p);
    }
    tracing::debug!("no feed registry file found; using built-in feeds");
    Ok(FeedRegistry::default_seed())
}

fn parse_registry(s: &str, hint_ext: &str) -> Result<FeedRegistry> {
    let reg: FeedRegistry = if hint_ext == "json" {
        serde_json::from_str(s)?
    } else if hint_ext == "toml" {
        toml::from_str(s)?
    } else if let Ok(v) = toml::from_str::<FeedRegistry>(s) {
        v
    } else {
        serde_json::from_str(s).map_err(|_| anyhow!("unsupported feed registry format"))?
    };
    Ok(clean_registry(reg))
}

/// Trim entries, drop blanks and keep the first entry per source label.
/// Declared order is preserved.
fn clean_registry(reg: FeedRegistry) -> FeedRegistry {
    let mut seen = HashSet::new();
    let feeds = reg
        .feeds
        .into_iter()
        .filter_map(|f| {
            let name = f.name.trim().to_string();
            let url = f.url.trim().to_string();
            if name.is_empty() || url.is_empty() || !seen.insert(name.clone()) {
                return None;
            }
            Some(FeedEntry { name, url })
        })
        .collect();
    FeedRegistry { feeds }
}
