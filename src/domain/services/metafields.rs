//! Product metafields: loosely formatted merchant content turned into lists

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use crate::domain::services::tags::SpecEntry;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metafield {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// Sections of the product page fed by metafields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub short_description: Option<String>,
    pub key_features: Vec<String>,
    pub included_in_box: Vec<String>,
    pub specs: Vec<SpecEntry>,
}

impl ProductDetails {
    pub fn from_metafields(metafields: &[Metafield]) -> Self {
        let map = normalize_metafields(metafields);
        let field = |key: &str| map.get(key).map(String::as_str).unwrap_or("");
        Self {
            short_description: Some(field("short_description").to_string()).filter(|s| !s.is_empty()),
            key_features: as_string_list(field("key_features")),
            included_in_box: as_string_list(field("included_in_box")),
            specs: as_key_value_list(field("specs")),
        }
    }
}

/// Key -> value. Entries without a key are dropped; a missing value is empty.
pub fn normalize_metafields(metafields: &[Metafield]) -> HashMap<String, String> {
    metafields
        .iter()
        .filter_map(|m| {
            let key = m.key.as_deref().filter(|k| !k.is_empty())?;
            Some((key.to_string(), m.value.clone().unwrap_or_default()))
        })
        .collect()
}

/// A JSON array, or text split on newlines, carriage returns and `", "`.
pub fn as_string_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { return vec![]; }

    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(items) => return items.iter().map(value_text).filter(|s| !s.is_empty()).collect(),
            Err(_) => return non_empty(trimmed.split('\n')),
        }
    }

    non_empty(trimmed.split(['\n', '\r']).flat_map(|line| line.split(", ")))
}

/// `[{label|key, value}]`, `{label: value}`, or `Label: value` lines.
/// Malformed JSON gives an empty list.
pub fn as_key_value_list(raw: &str) -> Vec<SpecEntry> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { return vec![]; }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => items.iter().filter_map(entry_from_object).collect(),
            Ok(Value::Object(map)) => map
                .iter()
                .map(|(label, value)| SpecEntry { label: label.clone(), value: value_text(value) })
                .collect(),
            Ok(_) | Err(_) => vec![],
        };
    }

    trimmed
        .split('\n')
        .filter_map(|line| {
            // Only the segment between the first and second colon is kept.
            let mut parts = line.split(':').map(str::trim);
            let (label, value) = (parts.next()?, parts.next()?);
            (!label.is_empty() && !value.is_empty())
                .then(|| SpecEntry { label: label.to_string(), value: value.to_string() })
        })
        .collect()
}

fn entry_from_object(item: &Value) -> Option<SpecEntry> {
    let label = [item.get("label"), item.get("key")]
        .into_iter()
        .flatten()
        .map(value_text)
        .find(|s| !s.is_empty())?;
    let value = item.get("value").map(value_text).filter(|s| !s.is_empty())?;
    Some(SpecEntry { label, value })
}

/// Display text of a JSON value; null and false read as empty.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

fn non_empty<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
