// src/curate/markdown.rs
use chrono::NaiveDateTime;
use std::fmt::Write as _;

use super::{ellipsize, impact_bar, short_date, Curator, REPORT_HIGH_IMPACT_LIMIT};
use crate::analyze::{CategoryMap, ScoredItem};

impl Curator {
    pub fn to_markdown(
        &self,
        items: &[ScoredItem],
        categories: Option<&CategoryMap>,
        generated_at: NaiveDateTime,
    ) -> String {
        let plan = self.plan(items, categories, REPORT_HIGH_IMPACT_LIMIT);
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}", self.title));
        lines.push(format!(
            "\n**Generated**: {}",
            generated_at.format("%Y-%m-%d %H:%M")
        ));
        lines.push(format!("**Total news**: {}\n", plan.total));

        lines.push("## Summary".into());
        lines.push(String::new());
        if !plan.sections.is_empty() {
            lines.push("| Category | Count |".into());
            lines.push("|----------|-------|".into());
            for s in &plan.sections {
                lines.push(format!("| {} | {} |", s.category, s.total));
            }
            lines.push(String::new());
        }

        if !plan.high_impact.is_empty() {
            lines.push("## High Impact News".into());
            lines.push(String::new());
            for it in &plan.high_impact {
                lines.push(format_item_md(it));
            }
            lines.push(String::new());
        }

        if !plan.sections.is_empty() {
            lines.push("## News by Category".into());
            lines.push(String::new());
            for s in &plan.sections {
                lines.push(format!("### {}", s.category));
                lines.push(String::new());
                for it in s.shown {
                    lines.push(format_item_md(it));
                }
                if s.hidden() > 0 {
                    lines.push(format!("*...{} more*", s.hidden()));
                }
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }
}

fn format_item_md(it: &ScoredItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "- **[{}]({})**", escape_link_text(&it.title), it.link);
    let _ = writeln!(
        out,
        "  - Impact: {} ({} pts)",
        impact_bar(it.impact_score),
        it.impact_score
    );
    let _ = writeln!(out, "  - Source: {} | {}", it.source, short_date(it.published));
    if !it.matched_keywords.is_empty() {
        let kws: Vec<&str> = it.matched_keywords.iter().take(5).map(String::as_str).collect();
        let _ = writeln!(out, "  - Keywords: {}", kws.join(", "));
    }
    if !it.description.is_empty() {
        let _ = writeln!(out, "  - {}", ellipsize(&it.description, 100));
    }
    out
}

fn escape_link_text(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}
