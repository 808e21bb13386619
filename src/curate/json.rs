// src/curate/json.rs
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Curator;
use crate::analyze::{CategoryMap, ScoredItem};

/// Parsed form of a JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub generated_at: NaiveDateTime,
    pub total_count: usize,
    pub news: Vec<ScoredItem>,
    #[serde(default)]
    pub categories: CategoryMap,
}

#[derive(Serialize)]
struct JsonReportRef<'a> {
    generated_at: NaiveDateTime,
    total_count: usize,
    news: &'a [ScoredItem],
    categories: &'a CategoryMap,
}

impl Curator {
    /// Full item list plus category groups. Nothing is truncated here.
    pub fn to_json(
        &self,
        items: &[ScoredItem],
        categories: Option<&CategoryMap>,
        generated_at: NaiveDateTime,
    ) -> Result<String> {
        let empty = CategoryMap::new();
        let report = JsonReportRef {
            generated_at,
            total_count: items.len(),
            news: items,
            categories: categories.unwrap_or(&empty),
        };
        serde_json::to_string_pretty(&report).context("serializing json report")
    }
}

pub fn parse_json_report(s: &str) -> Result<JsonReport> {
    serde_json::from_str(s).context("parsing json report")
}
