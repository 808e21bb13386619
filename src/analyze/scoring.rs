// src/analyze/scoring.rs
//! Impact scoring and category assignment.
//!
//! Score = `keyword_points` × distinct matched keywords
//!       + `high_impact_points` × distinct high-impact keywords present,
//! clamped to 100. Category = the table entry with the most keyword hits;
//! the earlier entry wins a tie.

use anyhow::Result;

use super::keywords::{prepare_keywords, KeywordConfig, ScoringWeights};
use super::matcher::KeywordMatcher;
use super::ScoredItem;
use crate::ingest::types::NewsItem;

pub const MAX_IMPACT_SCORE: u8 = 100;

/// Default `min_score` for [`Scorer::filter_stock_related`].
pub const DEFAULT_MIN_SCORE: u8 = 10;

#[derive(Debug, Clone)]
pub struct Scorer {
    keywords_ja: Vec<KeywordMatcher>,
    keywords_en: Vec<KeywordMatcher>,
    high_impact: Vec<KeywordMatcher>,
    categories: Vec<(String, Vec<KeywordMatcher>)>,
    fallback_category: String,
    weights: ScoringWeights,
}

impl Scorer {
    /// Compile matchers from the injected keyword tables.
    pub fn new(cfg: &KeywordConfig) -> Result<Self> {
        let keywords_ja = prepare_keywords(&cfg.keywords_ja)
            .iter()
            .map(|k| KeywordMatcher::substring(k))
            .collect();
        let keywords_en = prepare_keywords(&cfg.keywords_en)
            .iter()
            .map(|k| KeywordMatcher::word_boundary(k))
            .collect::<Result<Vec<_>>>()?;
        let high_impact = prepare_keywords(&cfg.high_impact)
            .iter()
            .map(|k| KeywordMatcher::script_aware(k))
            .collect::<Result<Vec<_>>>()?;

        let mut categories = Vec::with_capacity(cfg.categories.len());
        for rule in &cfg.categories {
            let matchers = prepare_keywords(&rule.keywords)
                .iter()
                .map(|k| KeywordMatcher::script_aware(k))
                .collect::<Result<Vec<_>>>()?;
            categories.push((rule.name.clone(), matchers));
        }

        Ok(Self {
            keywords_ja,
            keywords_en,
            high_impact,
            categories,
            fallback_category: cfg.fallback_category.clone(),
            weights: cfg.scoring,
        })
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    /// Enrich one item. The raw item is consumed; nothing is mutated in place.
    pub fn analyze(&self, item: NewsItem) -> ScoredItem {
        let text = format!("{} {}", item.title, item.description).to_lowercase();

        let mut matched: Vec<String> = Vec::new();
        for m in self.keywords_ja.iter().chain(self.keywords_en.iter()) {
            if m.is_match(&text) && !matched.iter().any(|k| k == m.keyword()) {
                matched.push(m.keyword().to_string());
            }
        }

        let impact_score = self.impact_score(&text, matched.len());
        let category = self.category_for(&text);
        ScoredItem::from_news(item, category, impact_score, matched)
    }

    /// `text` must be lower-cased.
    pub fn impact_score(&self, text: &str, matched_count: usize) -> u8 {
        let high_hits = self.high_impact.iter().filter(|m| m.is_match(text)).count();
        let raw = (matched_count as u64) * u64::from(self.weights.keyword_points)
            + (high_hits as u64) * u64::from(self.weights.high_impact_points);
        raw.min(u64::from(MAX_IMPACT_SCORE)) as u8
    }

    /// `text` must be lower-cased.
    pub fn category_for(&self, text: &str) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (name, matchers) in &self.categories {
            let hits = matchers.iter().filter(|m| m.is_match(text)).count();
            // strict `>`: on a tie the earlier table entry stays
            if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
                best = Some((name.as_str(), hits));
            }
        }
        best.map(|(name, _)| name.to_string())
            .unwrap_or_else(|| self.fallback_category.clone())
    }

    /// Score every item, keep `impact_score >= min_score`, highest first.
    /// Equal scores keep their input order.
    pub fn filter_stock_related(&self, items: Vec<NewsItem>, min_score: u8) -> Vec<ScoredItem> {
        let total = items.len();
        let mut kept: Vec<ScoredItem> = items
            .into_iter()
            .map(|it| self.analyze(it))
            .filter(|s| s.impact_score >= min_score)
            .collect();
        kept.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
        tracing::debug!(total, kept = kept.len(), min_score, "stock-related filter");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::keywords::CategoryRule;

    fn news(title: &str, description: &str) -> NewsItem {
        NewsItem {
            title: title.into(),
            description: description.into(),
            link: String::new(),
            source: "Test".into(),
            published: None,
        }
    }

    fn tiny_config() -> KeywordConfig {
        KeywordConfig {
            keywords_ja: vec!["決算".into()],
            keywords_en: vec!["earnings".into(), "stock".into()],
            high_impact: vec!["earnings".into()],
            categories: vec![
                CategoryRule {
                    name: "A".into(),
                    keywords: vec!["stock".into()],
                },
                CategoryRule {
                    name: "B".into(),
                    keywords: vec!["earnings".into()],
                },
            ],
            fallback_category: "Other".into(),
            scoring: ScoringWeights::default(),
        }
    }

    #[test]
    fn custom_tables_are_honored() {
        let s = Scorer::new(&tiny_config()).unwrap();
        let out = s.analyze(news("Earnings beat lifts stock", ""));
        assert_eq!(out.matched_keywords, vec!["earnings", "stock"]);
        assert_eq!(out.impact_score, 2 * 5 + 10);
        // one hit each: first declared category wins
        assert_eq!(out.category, "A");
    }

    #[test]
    fn no_hits_falls_back() {
        let s = Scorer::new(&tiny_config()).unwrap();
        let out = s.analyze(news("Weather is nice", "sunny"));
        assert!(out.matched_keywords.is_empty());
        assert_eq!(out.impact_score, 0);
        assert_eq!(out.category, "Other");
    }

    #[test]
    fn score_is_clamped() {
        let mut cfg = tiny_config();
        cfg.scoring.keyword_points = 90;
        let s = Scorer::new(&cfg).unwrap();
        let out = s.analyze(news("earnings stock 決算", ""));
        assert_eq!(out.impact_score, MAX_IMPACT_SCORE);
    }
}
