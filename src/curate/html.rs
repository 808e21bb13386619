// src/curate/html.rs
use chrono::NaiveDateTime;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;

use super::{ellipsize, short_date, Curator, REPORT_HIGH_IMPACT_LIMIT};
use crate::analyze::{CategoryMap, ScoredItem};

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background: #f5f5f5;
        }
        h1 { color: #333; border-bottom: 2px solid #333; padding-bottom: 10px; }
        h2 { color: #555; margin-top: 30px; }
        h3 { color: #666; }
        .meta { color: #888; font-size: 0.9em; }
        .news-item {
            background: white;
            border-radius: 8px;
            padding: 15px;
            margin: 10px 0;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .news-item h4 { margin: 0 0 10px 0; }
        .news-item a { color: #1a73e8; text-decoration: none; }
        .news-item a:hover { text-decoration: underline; }
        .impact-bar {
            display: inline-block;
            width: 100px;
            height: 10px;
            background: #eee;
            border-radius: 5px;
            overflow: hidden;
        }
        .impact-fill {
            height: 100%;
            background: linear-gradient(90deg, #4caf50, #ff9800, #f44336);
        }
        .keywords { color: #666; font-size: 0.85em; }
        .source { color: #888; font-size: 0.85em; }
        .more { color: #888; font-style: italic; }
        .high-impact { border-left: 4px solid #f44336; }
        .category-badge {
            display: inline-block;
            padding: 2px 8px;
            background: #e3f2fd;
            border-radius: 12px;
            font-size: 0.8em;
            color: #1565c0;
        }
        .summary-table { width: 100%; border-collapse: collapse; }
        .summary-table th, .summary-table td {
            padding: 8px;
            text-align: left;
            border-bottom: 1px solid #ddd;
        }
"#;

impl Curator {
    pub fn to_html(
        &self,
        items: &[ScoredItem],
        categories: Option<&CategoryMap>,
        generated_at: NaiveDateTime,
    ) -> String {
        let plan = self.plan(items, categories, REPORT_HIGH_IMPACT_LIMIT);
        let title = encode_text(&self.title);

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="meta">Generated: {} | Total news: {}</p>
"#,
            generated_at.format("%Y-%m-%d %H:%M"),
            plan.total
        );

        if !plan.sections.is_empty() {
            html.push_str("<h2>Summary</h2>\n<table class='summary-table'>\n");
            html.push_str("<tr><th>Category</th><th>Count</th></tr>\n");
            for s in &plan.sections {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    encode_text(s.category),
                    s.total
                );
            }
            html.push_str("</table>\n");
        }

        if !plan.high_impact.is_empty() {
            html.push_str("<h2>High Impact News</h2>\n");
            for it in &plan.high_impact {
                html.push_str(&format_item_html(it, true));
            }
        }

        if !plan.sections.is_empty() {
            html.push_str("<h2>News by Category</h2>\n");
            for s in &plan.sections {
                let _ = writeln!(html, "<h3>{} ({})</h3>", encode_text(s.category), s.total);
                for it in s.shown {
                    html.push_str(&format_item_html(it, false));
                }
                if s.hidden() > 0 {
                    let _ = writeln!(html, "<p class=\"more\">...{} more</p>", s.hidden());
                }
            }
        }

        html.push_str("</body></html>");
        html
    }
}

fn format_item_html(it: &ScoredItem, high_impact: bool) -> String {
    let class_name = if high_impact {
        "news-item high-impact"
    } else {
        "news-item"
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="{class_name}">
    <h4><a href="{}" target="_blank">{}</a></h4>
    <div class="impact-bar"><div class="impact-fill" style="width: {}%"></div></div>
    <span> {} pts</span>
    <span class="category-badge">{}</span>
    <p class="source">{} | {}</p>
"#,
        encode_double_quoted_attribute(&it.link),
        encode_text(&it.title),
        it.impact_score,
        it.impact_score,
        encode_text(&it.category),
        encode_text(&it.source),
        short_date(it.published),
    );

    if !it.matched_keywords.is_empty() {
        let kws: Vec<&str> = it.matched_keywords.iter().take(5).map(String::as_str).collect();
        let _ = writeln!(
            html,
            "    <p class=\"keywords\">Keywords: {}</p>",
            encode_text(&kws.join(", "))
        );
    }
    if !it.description.is_empty() {
        let _ = writeln!(
            html,
            "    <p>{}</p>",
            encode_text(&ellipsize(&it.description, 150))
        );
    }

    html.push_str("</div>\n");
    html
}
