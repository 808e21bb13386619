// src/analyze/keywords.rs
//! Keyword tables for impact scoring, loaded from `config/keywords.toml`.
//!
//! TOML shape:
//! ```toml
//! keywords_ja = ["決算", "株価"]
//! keywords_en = ["earnings", "stock"]
//! high_impact = ["決算", "earnings"]
//! fallback_category = "Other"
//!
//! [scoring]
//! keyword_points = 5
//! high_impact_points = 10
//!
//! [[categories]]
//! name = "決算・業績"
//! keywords = ["決算", "earnings"]
//! ```
//!
//! Category order in the file is significant: ties go to the earlier entry.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ENV_KEYWORDS_PATH: &str = "CURATOR_KEYWORDS_PATH";
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Other";

fn default_fallback_category() -> String {
    DEFAULT_FALLBACK_CATEGORY.to_string()
}
fn default_keyword_points() -> u32 {
    5
}
fn default_high_impact_points() -> u32 {
    10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points per distinct matched keyword.
    #[serde(default = "default_keyword_points")]
    pub keyword_points: u32,
    /// Bonus per distinct high-impact keyword present.
    #[serde(default = "default_high_impact_points")]
    pub high_impact_points: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_points: default_keyword_points(),
            high_impact_points: default_high_impact_points(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Matched as plain substrings (no word boundaries in Japanese).
    #[serde(default)]
    pub keywords_ja: Vec<String>,
    /// Matched case-insensitively on word boundaries.
    #[serde(default)]
    pub keywords_en: Vec<String>,
    #[serde(default)]
    pub high_impact: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
    #[serde(default)]
    pub scoring: ScoringWeights,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl KeywordConfig {
    /// Built-in tables: Japanese and English market-moving vocabulary.
    pub fn default_seed() -> Self {
        fn list(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        let keywords_ja = list(&[
            // corporate
            "決算", "業績", "利益", "売上", "増収", "減収", "増益", "減益",
            "上方修正", "下方修正", "配当", "株主還元", "自社株買い",
            "M&A", "買収", "合併", "提携", "事業売却", "事業再編",
            "新製品", "新サービス", "事業拡大", "撤退",
            // market
            "株価", "株式市場", "相場", "日経平均", "TOPIX", "東証",
            "ダウ", "S&P", "ナスダック", "NYSE",
            "上昇", "下落", "急騰", "急落", "暴落", "反発",
            "円高", "円安", "為替", "ドル円",
            // indicators
            "GDP", "金利", "インフレ", "デフレ", "景気", "雇用統計",
            "CPI", "消費者物価", "失業率", "貿易収支",
            // policy
            "金融政策", "利上げ", "利下げ", "量的緩和", "日銀", "FRB",
            "規制", "法改正", "補助金", "関税", "制裁",
            // risk
            "リスク", "危機", "破綻", "倒産", "不正", "訴訟",
            "地政学", "紛争", "戦争", "パンデミック",
        ]);

        let keywords_en = list(&[
            // corporate
            "earnings", "revenue", "profit", "loss", "guidance",
            "dividend", "buyback", "acquisition", "merger", "IPO",
            "partnership", "restructuring", "layoff", "expansion",
            // market
            "stock", "shares", "market", "index", "rally", "selloff",
            "bull", "bear", "volatility", "trading",
            "dow", "s&p", "nasdaq", "ftse", "nikkei",
            // indicators
            "gdp", "inflation", "deflation", "interest rate", "employment",
            "unemployment", "cpi", "ppi", "retail sales", "housing",
            // policy
            "fed", "ecb", "boj", "rate hike", "rate cut",
            "quantitative easing", "tapering", "regulation", "tariff", "sanction",
            // risk
            "crisis", "bankruptcy", "default", "fraud", "lawsuit",
            "geopolitical", "conflict", "war", "pandemic", "recession",
        ]);

        let high_impact = list(&[
            "決算", "earnings", "金融政策", "fed", "利上げ", "rate hike",
            "買収", "acquisition", "merger", "M&A", "破綻", "bankruptcy",
            "上方修正", "下方修正", "guidance", "危機", "crisis",
        ]);

        let categories = [
            (
                "決算・業績",
                &["決算", "業績", "利益", "売上", "earnings", "revenue", "profit", "guidance"][..],
            ),
            (
                "金融政策",
                &["金利", "利上げ", "利下げ", "金融政策", "fed", "日銀", "boj", "ecb", "rate"][..],
            ),
            (
                "M&A・事業再編",
                &["買収", "合併", "M&A", "提携", "acquisition", "merger", "partnership"][..],
            ),
            (
                "市場動向",
                &["株価", "相場", "日経", "ダウ", "stock", "market", "index", "rally", "selloff"][..],
            ),
            (
                "為替",
                &["円高", "円安", "為替", "ドル", "forex", "currency", "dollar", "yen"][..],
            ),
            (
                "経済指標",
                &["GDP", "インフレ", "雇用", "CPI", "inflation", "unemployment", "economic"][..],
            ),
            (
                "地政学リスク",
                &["地政学", "紛争", "戦争", "制裁", "geopolitical", "conflict", "war", "sanction"][..],
            ),
            (
                "企業ニュース",
                &["新製品", "事業拡大", "撤退", "product", "expansion", "launch"][..],
            ),
        ]
        .into_iter()
        .map(|(name, kws)| CategoryRule {
            name: name.to_string(),
            keywords: list(kws),
        })
        .collect();

        Self {
            keywords_ja,
            keywords_en,
            high_impact,
            categories,
            fallback_category: default_fallback_category(),
            scoring: ScoringWeights::default(),
        }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

/// Lower-case, trim and de-duplicate, keeping first-seen order.
pub fn prepare_keywords(words: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for w in words {
        let k = w.trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }
    out
}

/// Load keyword tables from an explicit path (TOML or JSON by extension).
pub fn load_keywords_from(path: &Path) -> Result<KeywordConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading keyword config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg: KeywordConfig = match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?,
        _ => toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?,
    };
    if cfg.fallback_category.trim().is_empty() {
        return Err(anyhow!("fallback_category must not be empty"));
    }
    Ok(cfg)
}

/// Load keyword tables using env var + fallbacks:
/// 1) $CURATOR_KEYWORDS_PATH
/// 2) config/keywords.toml
/// 3) config/keywords.json
/// 4) built-in seed
pub fn load_keywords_default() -> Result<KeywordConfig> {
    if let Ok(p) = std::env::var(ENV_KEYWORDS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_keywords_from(&pb);
        }
        return Err(anyhow!("{ENV_KEYWORDS_PATH} points to non-existent path"));
    }
    for candidate in ["config/keywords.toml", "config/keywords.json"] {
        let pb = PathBuf::from(candidate);
        if pb.exists() {
            return load_keywords_from(&pb);
        }
    }
    Ok(KeywordConfig::default_seed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_lowercases_and_dedups_in_order() {
        let words = vec![
            "S&P".to_string(),
            " fed ".into(),
            "s&p".into(),
            "".into(),
            "M&A".into(),
        ];
        assert_eq!(prepare_keywords(&words), vec!["s&p", "fed", "m&a"]);
    }

    #[test]
    fn toml_defaults_fill_missing_sections() {
        let cfg: KeywordConfig = toml::from_str(
            r#"
keywords_ja = ["決算"]

[[categories]]
name = "A"
keywords = ["x"]

[[categories]]
name = "B"
keywords = ["y"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.fallback_category, "Other");
        assert_eq!(cfg.scoring, ScoringWeights::default());
        assert!(cfg.keywords_en.is_empty());
        assert_eq!(cfg.category_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
