// tests/ingest_dialects.rs
use chrono::{NaiveDate, NaiveDateTime};
use news_stock_curator::ingest::dialect::{parse_feed, sniff, Dialect};

const RSS2_XML: &str = include_str!("fixtures/rss2.xml");
const ATOM_XML: &str = include_str!("fixtures/atom.xml");
const RDF_XML: &str = include_str!("fixtures/rdf.xml");

fn utc(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn fixtures_are_detected_by_root_element() {
    assert_eq!(sniff(RSS2_XML).unwrap(), Some(Dialect::Rss2));
    assert_eq!(sniff(ATOM_XML).unwrap(), Some(Dialect::Atom));
    assert_eq!(sniff(RDF_XML).unwrap(), Some(Dialect::Rdf));
}

#[test]
fn rss2_fixture_parses_items_in_document_order() {
    let items = parse_feed("Wire", RSS2_XML).expect("rss2 parse ok");
    assert_eq!(items.len(), 3, "channel-level title/link must not become items");

    let first = &items[0];
    assert_eq!(first.title, "日経平均が急落、決算発表を受けて株価が暴落");
    assert_eq!(first.link, "https://wire.example.com/a/1");
    assert_eq!(first.description, "東京市場では売りが先行した。");
    assert_eq!(first.source, "Wire");
    // +0900 shifted to UTC
    assert_eq!(first.published, Some(utc(6, 0, 30)));

    // dc:date is used when pubDate is missing
    assert_eq!(items[1].published, Some(utc(6, 1, 0)));
    assert_eq!(
        items[1].description,
        "Stocks fell & the dollar rose after the statement."
    );

    assert_eq!(items[2].published, None);
}

#[test]
fn atom_fixture_prefers_alternate_link_and_falls_back_to_updated() {
    let items = parse_feed("Deals", ATOM_XML).expect("atom parse ok");
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].title, "Acme announces merger with Globex");
    assert_eq!(items[0].link, "https://deals.example.com/news/1");
    assert_eq!(items[0].description, "The acquisition values Globex at $4bn.");
    assert_eq!(items[0].published, Some(utc(5, 17, 0)));

    assert_eq!(items[1].link, "https://deals.example.com/news/2");
    assert_eq!(items[1].description, "Management kept its full-year outlook.");
    assert_eq!(items[1].published, Some(utc(5, 22, 0)));
}

#[test]
fn rdf_fixture_reads_dc_dates() {
    let items = parse_feed("Kabu", RDF_XML).expect("rdf parse ok");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "日銀が利上げを決定、円高が進行");
    assert_eq!(items[0].published, Some(utc(6, 3, 0)));
    // date-only values land on midnight UTC
    assert_eq!(items[1].published, Some(utc(5, 0, 0)));
    assert!(items[1].description.is_empty());
}

#[test]
fn unknown_root_yields_no_items() {
    let xml = r#"<?xml version="1.0"?><html><body><p>not a feed</p></body></html>"#;
    let items = parse_feed("Web", xml).expect("well-formed xml is not an error");
    assert!(items.is_empty());
}

#[test]
fn empty_document_is_an_error() {
    assert!(parse_feed("Empty", "").is_err());
}
