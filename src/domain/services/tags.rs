//! Tag-driven product metadata: badge and tech-spec extraction

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Merchandising badge shown on product cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    New,
    Restock,
    Sale,
    SoldOut,
    Limited,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::New => "NEW",
            Badge::Restock => "RESTOCK",
            Badge::Sale => "SALE",
            Badge::SoldOut => "SOLD OUT",
            Badge::Limited => "LIMITED",
        }
    }
}

/// Lowercase tag -> badge. Matched exactly, never as a substring.
const BADGE_KEYWORDS: [(&str, Badge); 5] = [
    ("new", Badge::New),
    ("restock", Badge::Restock),
    ("sale", Badge::Sale),
    ("sold out", Badge::SoldOut),
    ("limited", Badge::Limited),
];

/// Scan order matters when one tag mentions several keywords.
const SPEC_KEYWORDS: [&str; 6] = ["screen", "cpu", "ram", "storage", "battery", "display"];

/// Insertion-ordered spec map. Overwriting a key keeps its original position,
/// so "first N specs" is stable across repeated derivations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecMap { entries: Vec<(String, String)> }

impl SpecMap {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The first `limit` entries, in insertion order.
    pub fn preview(&self, limit: usize) -> Vec<SpecEntry> {
        self.iter()
            .take(limit)
            .map(|(label, value)| SpecEntry { label: label.to_string(), value: value.to_string() })
            .collect()
    }
}

impl Serialize for SpecMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A single label/value row, as rendered in spec blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub badge: Option<Badge>,
    pub specs: SpecMap,
}

pub fn parse_tags<S: AsRef<str>>(tags: &[S]) -> TagSummary {
    TagSummary { badge: derive_badge(tags), specs: derive_specs(tags) }
}

/// Badge of the first tag that exactly (case-insensitively) names one.
pub fn derive_badge<S: AsRef<str>>(tags: &[S]) -> Option<Badge> {
    tags.iter().find_map(|tag| {
        let lower = tag.as_ref().to_lowercase();
        BADGE_KEYWORDS.iter().find(|(kw, _)| *kw == lower).map(|(_, badge)| *badge)
    })
}

/// Builds the spec map from `KEY: value` tags and keyword tags such as
/// `Battery 4500mAh`. Tags matching neither form are ignored.
pub fn derive_specs<S: AsRef<str>>(tags: &[S]) -> SpecMap {
    let mut specs = SpecMap::new();
    for tag in tags {
        let tag = tag.as_ref();
        if let Some((key, value)) = tag.split_once(':') {
            let (key, value) = (key.trim(), value.trim());
            if !key.is_empty() && !value.is_empty() {
                specs.insert(key.to_uppercase(), value.to_string());
            }
            continue;
        }
        // ASCII lowering keeps byte offsets aligned with the input tag.
        let lower = tag.to_ascii_lowercase();
        for keyword in SPEC_KEYWORDS {
            let Some(start) = lower.find(keyword) else { continue };
            let mut rest = String::with_capacity(tag.len() - keyword.len());
            rest.push_str(&tag[..start]);
            rest.push_str(&tag[start + keyword.len()..]);
            let value = rest.trim();
            if !value.is_empty() {
                specs.insert(keyword.to_uppercase(), value.to_string());
            }
        }
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_exact_badge_wins() {
        assert_eq!(derive_badge(&["blue", "New", "sale"]), Some(Badge::New));
        assert_eq!(derive_badge(&["SOLD OUT"]), Some(Badge::SoldOut));
        assert_eq!(Badge::SoldOut.label(), "SOLD OUT");
    }

    #[test]
    fn test_badge_requires_exact_match() {
        assert_eq!(derive_badge(&["brand new", "sales", " new"]), None);
    }

    #[test]
    fn test_empty_tags() {
        let empty: [&str; 0] = [];
        let summary = parse_tags(&empty);
        assert_eq!(summary.badge, None);
        assert!(summary.specs.is_empty());
    }

    #[test]
    fn test_colon_and_keyword_specs() {
        let specs = derive_specs(&["Screen: 3.5in", "Battery 4500mAh"]);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs.get("SCREEN"), Some("3.5in"));
        assert_eq!(specs.get("BATTERY"), Some("4500mAh"));
    }

    #[test]
    fn test_colon_splits_once() {
        let specs = derive_specs(&["cpu: arm:v7 ", ": empty", "novalue:  "]);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs.get("CPU"), Some("arm:v7"));
    }

    #[test]
    fn test_colon_tag_skips_keyword_rule() {
        // Empty value, and no fallback to the keyword match
        let specs = derive_specs(&["Battery:"]);
        assert!(specs.is_empty());
    }

    #[test]
    fn test_keyword_removed_case_insensitively() {
        let specs = derive_specs(&["4GB RAM", "STORAGE 64gb"]);
        assert_eq!(specs.get("RAM"), Some("4GB"));
        assert_eq!(specs.get("STORAGE"), Some("64gb"));
    }

    #[test]
    fn test_keyword_only_tag_contributes_nothing() {
        assert!(derive_specs(&["Display", "  cpu "]).is_empty());
    }

    #[test]
    fn test_tag_with_several_keywords() {
        let specs = derive_specs(&["Display screen 6in"]);
        assert_eq!(specs.get("SCREEN"), Some("Display  6in"));
        assert_eq!(specs.get("DISPLAY"), Some("screen 6in"));
        let keys: Vec<_> = specs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["SCREEN", "DISPLAY"]);
    }

    #[test]
    fn test_later_tags_overwrite_in_place() {
        let specs = derive_specs(&["Screen: 3in", "CPU: A1", "Screen 5in"]);
        assert_eq!(specs.get("SCREEN"), Some("5in"));
        let keys: Vec<_> = specs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["SCREEN", "CPU"]);
    }

    #[test]
    fn test_non_ascii_tags_do_not_panic() {
        let specs = derive_specs(&["Écran display 5\""]);
        assert_eq!(specs.get("DISPLAY"), Some("Écran  5\""));
    }

    #[test]
    fn test_spec_map_serializes_in_order() {
        let specs = derive_specs(&["RAM: 2GB", "CPU: A1"]);
        assert_eq!(serde_json::to_string(&specs).unwrap(), r#"{"RAM":"2GB","CPU":"A1"}"#);
    }

    #[test]
    fn test_preview_limits_entries() {
        let specs = derive_specs(&["a: 1", "b: 2", "c: 3", "d: 4"]);
        let preview = specs.preview(3);
        assert_eq!(preview.len(), 3);
        assert_eq!(preview[2], SpecEntry { label: "C".into(), value: "3".into() });
    }

    proptest! {
        #[test]
        fn prop_specs_idempotent(tags in proptest::collection::vec(".{0,24}", 0..8)) {
            prop_assert_eq!(derive_specs(&tags), derive_specs(&tags));
        }

        #[test]
        fn prop_badge_is_first_exact_match(tags in proptest::collection::vec("(new|New|NEW|sale|SALE|limited|Restock|sold out|Sold Out|blue|x)", 0..6)) {
            let expected = tags.iter().find_map(|t| match t.to_lowercase().as_str() {
                "new" => Some(Badge::New),
                "sale" => Some(Badge::Sale),
                "limited" => Some(Badge::Limited),
                "restock" => Some(Badge::Restock),
                "sold out" => Some(Badge::SoldOut),
                _ => None,
            });
            prop_assert_eq!(derive_badge(&tags), expected);
        }
    }
}
