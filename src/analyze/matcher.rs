// src/analyze/matcher.rs
//! Keyword matchers over lower-cased text.

use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub enum KeywordMatcher {
    /// Plain `contains`, used for Japanese where words are not space-separated.
    Substring(String),
    /// Case-insensitive keyword with a word edge on both sides.
    WordBoundary { keyword: String, re: Regex },
}

impl KeywordMatcher {
    pub fn substring(keyword: &str) -> Self {
        Self::Substring(keyword.to_lowercase())
    }

    pub fn word_boundary(keyword: &str) -> Result<Self> {
        let keyword = keyword.to_lowercase();
        let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&keyword)))
            .with_context(|| format!("compiling keyword regex for {keyword:?}"))?;
        Ok(Self::WordBoundary { keyword, re })
    }

    /// Like [`Self::word_boundary`], but only ASCII letters, digits and `_`
    /// count as word characters, so "m&a" matches inside "大型m&aを発表".
    pub fn ascii_word(keyword: &str) -> Result<Self> {
        let keyword = keyword.to_lowercase();
        let re = Regex::new(&format!(
            r"(?i)(?:^|[^0-9a-z_]){}(?:$|[^0-9a-z_])",
            regex::escape(&keyword)
        ))
        .with_context(|| format!("compiling keyword regex for {keyword:?}"))?;
        Ok(Self::WordBoundary { keyword, re })
    }

    /// ASCII-only keywords get ASCII word edges, everything else is a substring.
    pub fn script_aware(keyword: &str) -> Result<Self> {
        if keyword.is_ascii() && keyword.chars().any(|c| c.is_ascii_alphanumeric()) {
            Self::ascii_word(keyword)
        } else {
            Ok(Self::substring(keyword))
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            Self::Substring(k) => k,
            Self::WordBoundary { keyword, .. } => keyword,
        }
    }

    /// `text` must already be lower-cased.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Substring(k) => text.contains(k.as_str()),
            Self::WordBoundary { re, .. } => re.is_match(text),
        }
    }
}
