// src/analyze/mod.rs
//! Analysis pipeline: keyword tables -> matchers -> impact score + category.

pub mod categorize;
pub mod keywords;
pub mod matcher;
pub mod scoring;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ingest::types::NewsItem;

// Re-export convenient types.
pub use crate::analyze::categorize::{categorize, CategoryMap};
pub use crate::analyze::keywords::{CategoryRule, KeywordConfig, ScoringWeights};
pub use crate::analyze::matcher::KeywordMatcher;
pub use crate::analyze::scoring::{Scorer, DEFAULT_MIN_SCORE, MAX_IMPACT_SCORE};

/// A news item enriched by the scorer. This is also the JSON item schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub source: String,
    pub published: Option<NaiveDateTime>,
    pub category: String,
    pub impact_score: u8, // 0..=100
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

impl ScoredItem {
    pub fn from_news(
        news: NewsItem,
        category: String,
        impact_score: u8,
        matched_keywords: Vec<String>,
    ) -> Self {
        Self {
            title: news.title,
            description: news.description,
            link: news.link,
            source: news.source,
            published: news.published,
            category,
            impact_score: impact_score.min(MAX_IMPACT_SCORE),
            matched_keywords,
        }
    }
}
