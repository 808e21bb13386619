// src/ingest/dialect.rs
//! Feed dialects: RSS 2.0, Atom and RDF (RSS 1.0).
//!
//! The root element decides the dialect once per document. Each dialect is a
//! static `Layout` (entry element + field table); a single namespace-aware
//! walker then extracts entries for every dialect the same way.

use anyhow::{anyhow, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::ingest::clean_description;
use crate::ingest::dates::parse_published;
use crate::ingest::strip_html;
use crate::ingest::types::NewsItem;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const RSS1_NS: &[u8] = b"http://purl.org/rss/1.0/";
const DC_NS: &[u8] = b"http://purl.org/dc/elements/1.1/";

const NO_TITLE: &str = "No Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Rss2,
    Atom,
    Rdf,
}

/// Element name matched by namespace URI (`None` = no namespace) and local name.
#[derive(Debug, Clone, Copy)]
struct Tag {
    ns: Option<&'static [u8]>,
    local: &'static [u8],
}

impl Tag {
    const fn plain(local: &'static [u8]) -> Self {
        Self { ns: None, local }
    }

    const fn in_ns(ns: &'static [u8], local: &'static [u8]) -> Self {
        Self {
            ns: Some(ns),
            local,
        }
    }

    fn matches(&self, ns: &ResolveResult, local: &[u8]) -> bool {
        if self.local != local {
            return false;
        }
        match (self.ns, ns) {
            (None, ResolveResult::Unbound) => true,
            (Some(want), ResolveResult::Bound(Namespace(got))) => want == *got,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    /// Atom style: the URL lives in the `href` attribute.
    LinkHref,
    Description,
    DescriptionFallback,
    Published,
    PublishedFallback,
}

struct Layout {
    entry: Tag,
    fields: &'static [(Tag, Field)],
}

static RSS2_LAYOUT: Layout = Layout {
    entry: Tag::plain(b"item"),
    fields: &[
        (Tag::plain(b"title"), Field::Title),
        (Tag::plain(b"link"), Field::Link),
        (Tag::plain(b"description"), Field::Description),
        (Tag::plain(b"pubDate"), Field::Published),
        (Tag::in_ns(DC_NS, b"date"), Field::PublishedFallback),
    ],
};

static ATOM_LAYOUT: Layout = Layout {
    entry: Tag::in_ns(ATOM_NS, b"entry"),
    fields: &[
        (Tag::in_ns(ATOM_NS, b"title"), Field::Title),
        (Tag::in_ns(ATOM_NS, b"link"), Field::LinkHref),
        (Tag::in_ns(ATOM_NS, b"summary"), Field::Description),
        (Tag::in_ns(ATOM_NS, b"content"), Field::DescriptionFallback),
        (Tag::in_ns(ATOM_NS, b"published"), Field::Published),
        (Tag::in_ns(ATOM_NS, b"updated"), Field::PublishedFallback),
    ],
};

static RDF_LAYOUT: Layout = Layout {
    entry: Tag::in_ns(RSS1_NS, b"item"),
    fields: &[
        (Tag::in_ns(RSS1_NS, b"title"), Field::Title),
        (Tag::in_ns(RSS1_NS, b"link"), Field::Link),
        (Tag::in_ns(RSS1_NS, b"description"), Field::Description),
        (Tag::in_ns(DC_NS, b"date"), Field::Published),
    ],
};

impl Dialect {
    /// Pick the dialect from the root element, if it is one we understand.
    fn from_root(ns: &ResolveResult, local: &[u8]) -> Option<Self> {
        if Tag::plain(b"rss").matches(ns, local) {
            Some(Self::Rss2)
        } else if Tag::in_ns(ATOM_NS, b"feed").matches(ns, local) {
            Some(Self::Atom)
        } else if local.eq_ignore_ascii_case(b"rdf") {
            Some(Self::Rdf)
        } else {
            None
        }
    }

    fn layout(self) -> &'static Layout {
        match self {
            Self::Rss2 => &RSS2_LAYOUT,
            Self::Atom => &ATOM_LAYOUT,
            Self::Rdf => &RDF_LAYOUT,
        }
    }
}

/// Detect the dialect of `xml` without extracting anything.
/// `Ok(None)` means well-formed start but an unknown root element.
pub fn sniff(xml: &str) -> Result<Option<Dialect>> {
    let mut reader = NsReader::from_str(xml);
    read_root(&mut reader).map(|(dialect, _)| dialect)
}

/// Advance `reader` past the root start tag and map it to a dialect.
/// Also returns the root's local name for logging.
fn read_root(reader: &mut NsReader<&[u8]>) -> Result<(Option<Dialect>, String)> {
    loop {
        let (ns, ev) = reader
            .read_resolved_event()
            .context("reading feed root element")?;
        match ev {
            Event::Start(e) | Event::Empty(e) => {
                let local = e.local_name();
                let root = String::from_utf8_lossy(local.as_ref()).into_owned();
                return Ok((Dialect::from_root(&ns, local.as_ref()), root));
            }
            Event::Eof => return Err(anyhow!("feed document has no root element")),
            _ => {}
        }
    }
}

/// Fields of one entry as collected from the XML, before cleanup.
#[derive(Debug, Default)]
struct RawEntry {
    title: String,
    link: String,
    link_alternate: Option<String>,
    link_any: Option<String>,
    description: String,
    description_fallback: String,
    published: String,
    published_fallback: String,
}

impl RawEntry {
    fn push_text(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::DescriptionFallback => &mut self.description_fallback,
            Field::Published => &mut self.published,
            Field::PublishedFallback => &mut self.published_fallback,
            Field::LinkHref => return,
        };
        slot.push_str(text);
    }

    /// Atom entries may carry several links; prefer `rel="alternate"` (or no rel).
    fn take_link_attrs(&mut self, e: &BytesStart) {
        let href = attr(e, "href");
        let rel = attr(e, "rel");
        if let Some(href) = href {
            if matches!(rel.as_deref(), None | Some("alternate")) && self.link_alternate.is_none()
            {
                self.link_alternate = Some(href.clone());
            }
            if self.link_any.is_none() {
                self.link_any = Some(href);
            }
        }
    }

    fn into_item(self, source: &str) -> NewsItem {
        let title = strip_html(&self.title);
        let link = if self.link.trim().is_empty() {
            self.link_alternate.or(self.link_any).unwrap_or_default()
        } else {
            self.link.trim().to_string()
        };
        let description = if self.description.trim().is_empty() {
            &self.description_fallback
        } else {
            &self.description
        };
        let published =
            parse_published(&self.published).or_else(|| parse_published(&self.published_fallback));

        NewsItem {
            title: if title.is_empty() {
                NO_TITLE.to_string()
            } else {
                title
            },
            description: clean_description(description),
            link,
            source: source.to_string(),
            published,
        }
    }
}

fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Parse a feed document of any supported dialect into news items.
///
/// Unknown root elements yield an empty list; malformed XML is an error.
pub fn parse_feed(source: &str, xml: &str) -> Result<Vec<NewsItem>> {
    let xml = scrub_html_entities_for_xml(xml);
    let mut reader = NsReader::from_str(&xml);
    reader.config_mut().trim_text(true);

    // 1) Root element -> dialect (decided once)
    let root = read_root(&mut reader).with_context(|| format!("parsing {source} feed xml"))?;
    let layout = match root {
        (Some(d), _) => {
            tracing::debug!(source, dialect = ?d, "feed dialect detected");
            d.layout()
        }
        (None, root) => {
            tracing::debug!(source, root = %root, "unknown feed root element");
            return Ok(Vec::new());
        }
    };

    // 2) Entries
    let mut out = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;
    let mut depth = 0usize; // nesting below the current entry element

    loop {
        let (ns, ev) = reader
            .read_resolved_event()
            .with_context(|| format!("parsing {source} feed xml"))?;
        match ev {
            Event::Start(e) => {
                let local = e.local_name();
                match current.as_mut() {
                    None => {
                        if layout.entry.matches(&ns, local.as_ref()) {
                            current = Some(RawEntry::default());
                            depth = 0;
                        }
                    }
                    Some(entry) => {
                        depth += 1;
                        if depth == 1 {
                            field = field_for(layout, &ns, local.as_ref());
                            if field == Some(Field::LinkHref) {
                                entry.take_link_attrs(&e);
                            }
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(entry) = current.as_mut() {
                    if depth == 0
                        && field_for(layout, &ns, e.local_name().as_ref()) == Some(Field::LinkHref)
                    {
                        entry.take_link_attrs(&e);
                    }
                }
            }
            Event::Text(t) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                    entry.push_text(f, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    entry.push_text(f, &String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                if current.is_some() {
                    if depth == 0 {
                        if let Some(entry) = current.take() {
                            out.push(entry.into_item(source));
                        }
                        field = None;
                    } else {
                        depth -= 1;
                        if depth == 0 {
                            field = None;
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn field_for(layout: &Layout, ns: &ResolveResult, local: &[u8]) -> Option<Field> {
    layout
        .fields
        .iter()
        .find(|(tag, _)| tag.matches(ns, local))
        .map(|(_, f)| *f)
}

/// Replace HTML-only entities that XML parsers reject as undeclared.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
