// src/curate/console.rs
use chrono::NaiveDateTime;
use std::fmt::Write as _;

use super::{ellipsize, Curator, CONSOLE_HIGH_IMPACT_LIMIT};
use crate::analyze::{CategoryMap, ScoredItem};

const RULE_WIDTH: usize = 60;
const MAX_BAR_UNITS: usize = 20;

impl Curator {
    /// Plain-text summary for the terminal: counts per category and the top
    /// high-impact headlines.
    pub fn console_summary(
        &self,
        items: &[ScoredItem],
        categories: Option<&CategoryMap>,
        generated_at: NaiveDateTime,
    ) -> String {
        let plan = self.plan(items, categories, CONSOLE_HIGH_IMPACT_LIMIT);
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let mut out = String::new();
        let _ = writeln!(out, "\n{heavy}");
        let _ = writeln!(out, "  {}", self.title);
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "  Generated: {}", generated_at.format("%Y-%m-%d %H:%M"));
        let _ = writeln!(out, "  Total news: {}", plan.total);
        let _ = writeln!(out, "{light}");

        if !plan.sections.is_empty() {
            let _ = writeln!(out, "\n  [By category]");
            for s in &plan.sections {
                let bar = "■".repeat(s.total.min(MAX_BAR_UNITS));
                let _ = writeln!(out, "    {:<15}: {bar} {}", s.category, s.total);
            }
        }

        if !plan.high_impact.is_empty() {
            let _ = writeln!(out, "\n  [High impact TOP{CONSOLE_HIGH_IMPACT_LIMIT}]");
            for (i, it) in plan.high_impact.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "    {}. [{}] {}",
                    i + 1,
                    it.impact_score,
                    ellipsize(&it.title, 50)
                );
                let _ = writeln!(out, "       {} | {}", it.source, it.category);
            }
        }

        let _ = writeln!(out, "\n{heavy}");
        out
    }
}
