// src/curate/mod.rs
//! Report rendering: console summary, Markdown, JSON and HTML.
//!
//! Every renderer works off the same [`ReportPlan`], so the item selection
//! (high-impact cut, per-category cap, "...N more" counts) is decided once
//! and only the syntax differs between formats.

pub mod console;
pub mod html;
pub mod json;
pub mod markdown;

use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::analyze::{CategoryMap, ScoredItem};

pub use crate::curate::json::{parse_json_report, JsonReport};

pub const DEFAULT_MAX_PER_CATEGORY: usize = 10;
/// Items at or above this score are "high impact".
pub const HIGH_IMPACT_THRESHOLD: u8 = 50;
/// High-impact section length in Markdown/HTML.
pub const REPORT_HIGH_IMPACT_LIMIT: usize = 10;
/// High-impact list length in the console summary.
pub const CONSOLE_HIGH_IMPACT_LIMIT: usize = 5;
pub const DEFAULT_TITLE: &str = "Stock-Moving News Curation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Console,
    Markdown,
    Json,
    Html,
}

impl OutputFormat {
    /// File extension for file-based formats; `None` for console.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Console => None,
            Self::Markdown => Some("md"),
            Self::Json => Some("json"),
            Self::Html => Some("html"),
        }
    }
}

/// `news_curation_<YYYYMMDD_HHMMSS>.<ext>`, or `None` for console output.
pub fn default_output_path(format: OutputFormat, now: NaiveDateTime) -> Option<PathBuf> {
    format
        .extension()
        .map(|ext| PathBuf::from(format!("news_curation_{}.{ext}", now.format("%Y%m%d_%H%M%S"))))
}

/// One category block of a report.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub category: &'a str,
    pub total: usize,
    pub shown: &'a [ScoredItem],
}

impl Section<'_> {
    /// Items cut by the per-category cap.
    pub fn hidden(&self) -> usize {
        self.total - self.shown.len()
    }
}

/// What a report contains, independent of output syntax.
#[derive(Debug, Clone)]
pub struct ReportPlan<'a> {
    pub total: usize,
    pub high_impact: Vec<&'a ScoredItem>,
    /// Ordered by item count, largest first.
    pub sections: Vec<Section<'a>>,
}

#[derive(Debug, Clone)]
pub struct Curator {
    pub max_per_category: usize,
    pub high_impact_threshold: u8,
    pub title: String,
}

impl Default for Curator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_CATEGORY)
    }
}

impl Curator {
    pub fn new(max_per_category: usize) -> Self {
        Self {
            max_per_category,
            high_impact_threshold: HIGH_IMPACT_THRESHOLD,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Decide which items appear where. `items` should already be sorted by score.
    pub fn plan<'a>(
        &self,
        items: &'a [ScoredItem],
        categories: Option<&'a CategoryMap>,
        high_impact_limit: usize,
    ) -> ReportPlan<'a> {
        let high_impact = items
            .iter()
            .filter(|it| it.impact_score >= self.high_impact_threshold)
            .take(high_impact_limit)
            .collect();

        let sections = categories
            .map(|cats| {
                cats.by_count_desc()
                    .into_iter()
                    .map(|(category, group)| Section {
                        category,
                        total: group.len(),
                        shown: &group[..group.len().min(self.max_per_category)],
                    })
                    .collect()
            })
            .unwrap_or_default();

        ReportPlan {
            total: items.len(),
            high_impact,
            sections,
        }
    }

    /// Render in any format. Console output is returned as text, not printed.
    pub fn render(
        &self,
        format: OutputFormat,
        items: &[ScoredItem],
        categories: Option<&CategoryMap>,
        generated_at: NaiveDateTime,
    ) -> Result<String> {
        Ok(match format {
            OutputFormat::Console => self.console_summary(items, categories, generated_at),
            OutputFormat::Markdown => self.to_markdown(items, categories, generated_at),
            OutputFormat::Json => self.to_json(items, categories, generated_at)?,
            OutputFormat::Html => self.to_html(items, categories, generated_at),
        })
    }
}

/// First `max` chars plus "..." when the text is longer.
pub(crate) fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub(crate) fn short_date(published: Option<NaiveDateTime>) -> String {
    published
        .map(|ts| ts.format("%m/%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Ten-cell text bar, one cell per 10 points.
pub(crate) fn impact_bar(score: u8) -> String {
    let filled = usize::from(score.min(100) / 10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_path_uses_timestamp_and_extension() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(
            default_output_path(OutputFormat::Markdown, now),
            Some(PathBuf::from("news_curation_20250106_090507.md"))
        );
        assert_eq!(default_output_path(OutputFormat::Console, now), None);
    }

    #[test]
    fn impact_bar_has_ten_cells() {
        assert_eq!(impact_bar(0), "░░░░░░░░░░");
        assert_eq!(impact_bar(45), "████░░░░░░");
        assert_eq!(impact_bar(100), "██████████");
    }

    #[test]
    fn ellipsize_counts_chars() {
        assert_eq!(ellipsize("日経平均株価", 4), "日経平均...");
        assert_eq!(ellipsize("short", 10), "short");
    }
}
