// tests/analyze_scoring.rs
use news_stock_curator::analyze::{CategoryRule, KeywordConfig, Scorer, MAX_IMPACT_SCORE};
use news_stock_curator::ingest::dialect::parse_feed;
use news_stock_curator::NewsItem;

const RSS2_XML: &str = include_str!("fixtures/rss2.xml");

fn news(title: &str, description: &str) -> NewsItem {
    NewsItem {
        title: title.into(),
        description: description.into(),
        link: "https://example.com/x".into(),
        source: "Test".into(),
        published: None,
    }
}

fn seed_scorer() -> Scorer {
    Scorer::new(&KeywordConfig::default_seed()).expect("seed tables compile")
}

#[test]
fn japanese_market_headline_scores_and_categorizes() {
    let scorer = seed_scorer();
    let item = news("日経平均が急落、決算発表を受けて株価が暴落", "");
    let scored = scorer.analyze(item.clone());

    assert_eq!(
        scored.matched_keywords,
        vec!["決算", "株価", "日経平均", "急落", "暴落"]
    );
    // 5 keywords x 5 + one high-impact keyword (決算) x 10
    assert_eq!(scored.impact_score, 35);
    assert_eq!(scored.category, "市場動向");

    // raw fields carried over untouched
    assert_eq!(scored.title, item.title);
    assert_eq!(scored.link, item.link);
    assert_eq!(scored.source, item.source);
}

#[test]
fn english_keywords_respect_word_boundaries() {
    let scorer = seed_scorer();
    let scored = scorer.analyze(news("Software award for local bakery", "Stocks unaffected"));
    // "war" inside "software"/"award" and "stock" inside "stocks" do not count
    assert!(scored.matched_keywords.is_empty());
    assert_eq!(scored.impact_score, 0);
    assert_eq!(scored.category, "Other");
}

#[test]
fn ascii_keywords_inside_japanese_headlines() {
    let scorer = seed_scorer();

    let scored = scorer.analyze(news("ソフトバンク、大型M&Aを発表", ""));
    assert_eq!(scored.matched_keywords, vec!["m&a"]);
    // keyword x 5 + M&A high-impact bonus
    assert_eq!(scored.impact_score, 15);
    assert_eq!(scored.category, "M&A・事業再編");

    let scored = scorer.analyze(news("日本のGDPが減少", ""));
    assert_eq!(scored.impact_score, 5);
    assert_eq!(scored.category, "経済指標");

    let scored = scorer.analyze(news("米FRBとFedが会合", ""));
    assert_eq!(scored.matched_keywords, vec!["frb"]);
    assert_eq!(scored.impact_score, 15);
    assert_eq!(scored.category, "金融政策");
}

#[test]
fn scores_stay_within_bounds() {
    let scorer = seed_scorer();
    let everything = KeywordConfig::default_seed().keywords_ja.join(" ");
    let scored = scorer.analyze(news(&everything, ""));
    assert_eq!(scored.impact_score, MAX_IMPACT_SCORE);

    for it in parse_feed("Wire", RSS2_XML).unwrap() {
        let s = scorer.analyze(it);
        assert!(s.impact_score <= MAX_IMPACT_SCORE);
    }
}

#[test]
fn filter_keeps_threshold_and_sorts_stably() {
    let cfg = KeywordConfig {
        keywords_ja: vec!["株価".into(), "決算".into()],
        keywords_en: vec![],
        high_impact: vec![],
        categories: vec![CategoryRule {
            name: "Market".into(),
            keywords: vec!["株価".into()],
        }],
        fallback_category: "Other".into(),
        scoring: Default::default(),
    };
    let scorer = Scorer::new(&cfg).unwrap();

    let items = vec![
        news("first 株価", ""),       // 5
        news("second 株価 決算", ""), // 10
        news("third none", ""),       // 0
        news("fourth 株価", ""),      // 5
    ];
    let kept = scorer.filter_stock_related(items, 5);

    let titles: Vec<&str> = kept.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["second 株価 決算", "first 株価", "fourth 株価"]);
    assert!(kept.iter().all(|s| s.impact_score >= 5));
    assert_eq!(kept[0].category, "Market");
}

#[test]
fn fixture_feed_end_to_end_scores() {
    let scorer = seed_scorer();
    let kept = scorer.filter_stock_related(parse_feed("Wire", RSS2_XML).unwrap(), 10);

    // the bakery story has no market vocabulary
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|s| s.title != "Local bakery wins award"));

    let fed = kept
        .iter()
        .find(|s| s.title.starts_with("Fed signals"))
        .unwrap();
    assert_eq!(fed.category, "金融政策");
    assert!(fed.matched_keywords.contains(&"rate hike".to_string()));
}
