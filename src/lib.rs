// src/lib.rs
// Public library surface for the binaries and integration tests.

// RSS/Atom/RDF fetching, parsing and age filtering
pub mod ingest;

// Keyword scoring and categorization
pub mod analyze;

// Report rendering (console, Markdown, JSON, HTML)
pub mod curate;

// Offline Japanese writing-style checks
pub mod style_check;

pub mod logging;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{categorize, CategoryMap, KeywordConfig, ScoredItem, Scorer};
pub use crate::curate::{Curator, OutputFormat};
pub use crate::ingest::types::{FeedSource, NewsItem};
pub use crate::ingest::Fetcher;
