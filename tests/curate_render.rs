// tests/curate_render.rs
use chrono::{NaiveDate, NaiveDateTime};
use news_stock_curator::curate::parse_json_report;
use news_stock_curator::{categorize, Curator, OutputFormat, ScoredItem};

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn scored(title: &str, category: &str, score: u8) -> ScoredItem {
    ScoredItem {
        title: title.into(),
        description: format!("{title} description"),
        link: format!("https://example.com/{}", title.replace(' ', "-")),
        source: "Wire".into(),
        published: NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(8, 15, 0),
        category: category.into(),
        impact_score: score,
        matched_keywords: vec!["merger".into(), "earnings".into()],
    }
}

/// Already sorted by score, as the scorer hands them over.
fn sample() -> Vec<ScoredItem> {
    vec![
        scored("Alpha merger", "M", 90),
        scored("Beta earnings", "E", 70),
        scored("M low 1", "M", 40),
        scored("M low 2", "M", 30),
        scored("M low 3", "M", 20),
    ]
}

#[test]
fn markdown_and_html_agree_on_selection() {
    let items = sample();
    let cats = categorize(&items);
    let curator = Curator::new(2);

    let md = curator.to_markdown(&items, Some(&cats), generated_at());
    let html = curator.to_html(&items, Some(&cats), generated_at());

    for doc in [&md, &html] {
        assert!(doc.contains("Alpha merger"));
        assert!(doc.contains("Beta earnings"));
        assert!(doc.contains("M low 1"));
        assert!(!doc.contains("M low 2"), "capped item leaked");
        assert!(!doc.contains("M low 3"), "capped item leaked");
        assert!(doc.contains("...2 more"));
        assert!(doc.contains("2025-01-06 09:00"));
    }

    // largest category first
    assert!(md.find("### M").unwrap() < md.find("### E").unwrap());
    assert!(md.contains("| M | 4 |"));
    assert!(md.contains("## High Impact News"));
    assert!(md.contains("█████████░ (90 pts)"));
    assert!(html.contains("<h3>M (4)</h3>"));
    assert!(html.contains(r#"class="news-item high-impact""#));
    assert!(html.contains("width: 90%"));
}

#[test]
fn high_impact_threshold_is_inclusive() {
    let items = vec![scored("Edge", "E", 50), scored("Below", "E", 49)];
    let cats = categorize(&items);
    let plan = Curator::default().plan(&items, Some(&cats), 10);
    let titles: Vec<&str> = plan.high_impact.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Edge"]);
}

#[test]
fn html_escapes_feed_text() {
    let mut item = scored("Gamma <script>alert(1)</script>", "E", 60);
    item.link = "https://example.com/gamma?a=1&b=2".into();
    let items = vec![item];
    let cats = categorize(&items);
    let html = Curator::default().to_html(&items, Some(&cats), generated_at());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("a=1&amp;b=2"));
}

#[test]
fn console_summary_lists_top_items_and_bars() {
    let items = sample();
    let cats = categorize(&items);
    let out = Curator::default().console_summary(&items, Some(&cats), generated_at());

    assert!(out.contains("Total news: 5"));
    assert!(out.contains("■■■■ 4"));
    assert!(out.contains("1. [90] Alpha merger"));
    assert!(out.contains("2. [70] Beta earnings"));
    assert!(!out.contains("3. [40]"), "only items at or above 50 are high impact");
}

#[test]
fn empty_report_renders_without_sections() {
    let curator = Curator::default();
    for format in [
        OutputFormat::Console,
        OutputFormat::Markdown,
        OutputFormat::Json,
        OutputFormat::Html,
    ] {
        let out = curator.render(format, &[], None, generated_at()).unwrap();
        assert!(!out.is_empty());
        assert!(!out.contains("News by Category"));
    }
}

#[test]
fn json_report_reads_back_identically() {
    let items = sample();
    let cats = categorize(&items);
    let json = Curator::new(2)
        .to_json(&items, Some(&cats), generated_at())
        .unwrap();

    let report = parse_json_report(&json).unwrap();
    assert_eq!(report.generated_at, generated_at());
    assert_eq!(report.total_count, 5);
    // no per-category cap in JSON
    assert_eq!(report.news, items);
    assert_eq!(report.categories, cats);

    let order: Vec<&str> = report.categories.iter().map(|(n, _)| n).collect();
    assert_eq!(order, vec!["M", "E"]);
}

#[test]
fn json_report_tolerates_missing_optional_fields() {
    let json = r#"{
        "generated_at": "2025-01-06T09:00:00",
        "total_count": 1,
        "news": [{
            "title": "t", "description": "", "link": "https://x.test", "source": "S",
            "published": null, "category": "Other", "impact_score": 15
        }]
    }"#;
    let report = parse_json_report(json).unwrap();
    assert!(report.categories.is_empty());
    assert!(report.news[0].matched_keywords.is_empty());

    assert!(parse_json_report("{not json").is_err());
}
