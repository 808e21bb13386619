// src/ingest/dates.rs
//! Publish-date parsing for feed items.
//!
//! Feeds disagree on date formats: RSS 2.0 uses RFC 2822, Atom and RDF use
//! ISO-8601 / RFC 3339. Everything is normalized to a UTC `NaiveDateTime`.

use chrono::{DateTime, NaiveDateTime};
use time::{
    format_description::well_known::{Iso8601, Rfc2822, Rfc3339},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

/// Parse a feed date, trying RFC 2822 first and ISO-8601 second.
/// Returns `None` for anything unparseable; callers never drop the item for it.
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return to_naive_utc(dt);
    }
    // zone names some feeds use in place of a numeric offset
    if let Some(head) = s.strip_suffix(" UTC").or_else(|| s.strip_suffix(" GMT")) {
        if let Ok(dt) = OffsetDateTime::parse(&format!("{head} +0000"), &Rfc2822) {
            return to_naive_utc(dt);
        }
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return to_naive_utc(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Iso8601::DEFAULT) {
        return to_naive_utc(dt);
    }
    // No offset given: read as UTC.
    if let Ok(dt) = PrimitiveDateTime::parse(s, &Iso8601::DEFAULT) {
        return to_naive_utc(dt.assume_utc());
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return to_naive_utc(dt.assume_utc());
    }
    if let Ok(d) = Date::parse(s, &Iso8601::DEFAULT) {
        return to_naive_utc(d.midnight().assume_utc());
    }

    tracing::debug!(raw = s, "unparseable publish date");
    None
}

fn to_naive_utc(dt: OffsetDateTime) -> Option<NaiveDateTime> {
    let utc = dt.to_offset(UtcOffset::UTC);
    DateTime::from_timestamp(utc.unix_timestamp(), utc.nanosecond()).map(|d| d.naive_utc())
}
