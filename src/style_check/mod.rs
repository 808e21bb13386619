// src/style_check/mod.rs
//! Offline Japanese writing-style checks (regex heuristics, no API calls).
//!
//! Rules run in a fixed order and each contributes at most one violation per
//! pattern group:
//! - `OFFLINE001` mixed です・ます / だ・である sentence endings
//! - `OFFLINE002` notation variants (サーバ / サーバー …)
//! - `OFFLINE003` redundant expressions (することができる …)
//! - `OFFLINE004` double honorifics (おっしゃられる …)
//! - `OFFLINE005` overlong sentences

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentences longer than this (in chars) are flagged.
pub const DEFAULT_MAX_SENTENCE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub rule_name: String,
    pub location: String,
    pub reason: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Run every offline rule over `text`.
pub fn check_document(text: &str) -> Vec<Violation> {
    check_document_with(text, DEFAULT_MAX_SENTENCE_CHARS)
}

pub fn check_document_with(text: &str, max_sentence_chars: usize) -> Vec<Violation> {
    let mut out = Vec::new();
    out.extend(rules::check_style_consistency(text));
    out.extend(rules::check_notation_inconsistency(text));
    out.extend(rules::check_redundant_expressions(text));
    out.extend(rules::check_double_honorifics(text));
    out.extend(rules::check_long_sentences(text, max_sentence_chars));
    tracing::debug!(violations = out.len(), "style check finished");
    out
}
