//! Field-extraction helpers shared by the response normalizers
//!
//! Upstream bodies are read as loose JSON. Absent or mistyped nested fields
//! resolve to `None` or an empty slice, never to a panic.

use serde_json::Value;

/// Array under `key`, or an empty slice when absent or not an array
pub fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Walk object keys and return the string at the end of the path
pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))?
        .as_str()
}

/// Non-empty strings at `path` within each entry, order kept, duplicates kept
pub fn names_at(entries: &[Value], path: &[&str]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| str_at(entry, path))
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The first `limit` entries, or all of them when fewer exist
pub fn head(entries: &[Value], limit: usize) -> &[Value] {
    &entries[..limit.min(entries.len())]
}

/// Field value as given, `null` when absent
pub fn passthrough(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}
