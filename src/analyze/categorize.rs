// src/analyze/categorize.rs
//! Grouping of scored items by category.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ScoredItem;

/// Insertion-ordered `category -> items` mapping.
///
/// Categories appear in first-seen order and items keep their input order
/// inside each bucket. Serializes as a JSON object in that same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    groups: Vec<(String, Vec<ScoredItem>)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ScoredItem) {
        match self.groups.iter_mut().find(|(name, _)| *name == item.category) {
            Some((_, items)) => items.push(item),
            None => self.groups.push((item.category.clone(), vec![item])),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[ScoredItem]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScoredItem])> {
        self.groups
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Categories sorted by item count, largest first; ties keep first-seen order.
    pub fn by_count_desc(&self) -> Vec<(&str, &[ScoredItem])> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        v
    }
}

/// Partition scored items by their category.
pub fn categorize(items: &[ScoredItem]) -> CategoryMap {
    let mut map = CategoryMap::new();
    for it in items {
        map.insert(it.clone());
    }
    map
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, items) in &self.groups {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to news items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CategoryMap, A::Error> {
                let mut groups = Vec::new();
                while let Some((name, items)) = access.next_entry::<String, Vec<ScoredItem>>()? {
                    groups.push((name, items));
                }
                Ok(CategoryMap { groups })
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(title: &str, category: &str) -> ScoredItem {
        ScoredItem {
            title: title.into(),
            description: String::new(),
            link: String::new(),
            source: "Test".into(),
            published: None,
            category: category.into(),
            impact_score: 10,
            matched_keywords: Vec::new(),
        }
    }

    #[test]
    fn keeps_first_seen_order_and_item_order() {
        let items = vec![
            scored("a1", "A"),
            scored("b1", "B"),
            scored("a2", "A"),
            scored("b2", "B"),
            scored("b3", "B"),
        ];
        let map = categorize(&items);
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
        let a: Vec<&str> = map.get("A").unwrap().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(a, vec!["a1", "a2"]);
        assert_eq!(map.total_items(), items.len());

        let ranked: Vec<&str> = map.by_count_desc().iter().map(|(n, _)| *n).collect();
        assert_eq!(ranked, vec!["B", "A"]);
    }

    #[test]
    fn json_object_preserves_order() {
        let map = categorize(&[scored("z", "Zeta"), scored("a", "Alpha")]);
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.find("Zeta").unwrap() < json.find("Alpha").unwrap());
        let back: CategoryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
