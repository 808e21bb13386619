// tests/analyze_categorize.rs
use news_stock_curator::{categorize, ScoredItem};

fn scored(title: &str, category: &str, score: u8) -> ScoredItem {
    ScoredItem {
        title: title.into(),
        description: String::new(),
        link: format!("https://example.com/{title}"),
        source: "Test".into(),
        published: None,
        category: category.into(),
        impact_score: score,
        matched_keywords: vec![],
    }
}

#[test]
fn every_item_lands_in_exactly_one_group() {
    let items = vec![
        scored("a", "為替", 60),
        scored("b", "市場動向", 40),
        scored("c", "為替", 30),
        scored("d", "Other", 20),
        scored("e", "市場動向", 10),
    ];
    let map = categorize(&items);

    assert_eq!(map.total_items(), items.len());
    for it in &items {
        let hits = map
            .iter()
            .filter(|(_, group)| group.contains(it))
            .count();
        assert_eq!(hits, 1, "{} must be in exactly one group", it.title);
        assert!(map.get(&it.category).unwrap().contains(it));
    }
}

#[test]
fn groups_keep_first_seen_order_and_item_order() {
    let items = vec![
        scored("a", "X", 50),
        scored("b", "Y", 40),
        scored("c", "X", 30),
    ];
    let map = categorize(&items);

    let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["X", "Y"]);

    let x: Vec<&str> = map.get("X").unwrap().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(x, vec!["a", "c"]);
}

#[test]
fn by_count_desc_breaks_ties_by_first_seen() {
    let items = vec![
        scored("a", "Solo", 50),
        scored("b", "Pair", 40),
        scored("c", "Pair", 30),
        scored("d", "Other", 20),
    ];
    let map = categorize(&items);
    let order: Vec<&str> = map.by_count_desc().into_iter().map(|(n, _)| n).collect();
    assert_eq!(order, vec!["Pair", "Solo", "Other"]);
}

#[test]
fn empty_input_gives_empty_map() {
    let map = categorize(&[]);
    assert!(map.is_empty());
    assert_eq!(map.total_items(), 0);
}
