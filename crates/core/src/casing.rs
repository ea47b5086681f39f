//! Key casing translation for identification records.
//!
//! The backend serializes every key inside an identification group in
//! lower camel case (`materialName`), while the form model addresses the same
//! keys in upper camel case (`MaterialName`). Only keys *inside* the named
//! groups are rewritten; top-level keys and non-group values pass through.

use serde_json::{Map, Value};

/// Nested groups of an identification record whose keys are rewritten.
pub const IDENTIFICATION_GROUPS: &[&str] = &[
    "section",
    "typology",
    "specificName",
    "author",
    "title",
    "material",
    "techniques",
];

/// Split a key on internal ASCII-uppercase boundaries and on `_` / `-`.
///
/// An uppercase letter only starts a new segment when the current segment is
/// non-empty, so a leading capital or a capital right after a separator does
/// not produce an empty segment.
fn split_segments(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            segments.push(std::mem::take(&mut current));
            continue;
        }
        if ch.is_ascii_uppercase() && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    segments.push(current);
    segments
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Convert a key to upper camel case.
///
/// ```
/// use catalogo_core::casing::to_upper_camel;
/// assert_eq!(to_upper_camel("materialName"), "MaterialName");
/// assert_eq!(to_upper_camel("described_part"), "DescribedPart");
/// assert_eq!(to_upper_camel("Room"), "Room");
/// ```
pub fn to_upper_camel(key: &str) -> String {
    split_segments(key)
        .iter()
        .map(|s| capitalize(s))
        .collect()
}

/// Convert a key to lower camel case (the backend convention).
///
/// ```
/// use catalogo_core::casing::to_lower_camel;
/// assert_eq!(to_lower_camel("MaterialName"), "materialName");
/// assert_eq!(to_lower_camel("room"), "room");
/// ```
pub fn to_lower_camel(key: &str) -> String {
    let upper = to_upper_camel(key);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rekey_groups(value: Value, convert: fn(&str) -> String) -> Value {
    let Value::Object(mut root) = value else {
        return value;
    };

    for group in IDENTIFICATION_GROUPS {
        if let Some(Value::Object(fields)) = root.get_mut(*group) {
            let rekeyed: Map<String, Value> = std::mem::take(fields)
                .into_iter()
                .map(|(key, v)| (convert(&key), v))
                .collect();
            *fields = rekeyed;
        }
    }

    Value::Object(root)
}

/// Rewrite backend group keys into form-model casing.
///
/// Idempotent: `map_backend_keys(map_backend_keys(x)) == map_backend_keys(x)`.
pub fn map_backend_keys(value: Value) -> Value {
    rekey_groups(value, to_upper_camel)
}

/// Rewrite form-model group keys into backend casing.
pub fn map_frontend_keys(value: Value) -> Value {
    rekey_groups(value, to_lower_camel)
}
