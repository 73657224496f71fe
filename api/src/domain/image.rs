//! Image reference normalization
//!
//! The `image_urls` column mixes storage formats: legacy rows hold a single
//! URL string, newer rows hold a JSON array, and some rows hold a string
//! that itself encodes a JSON array. Every view reduces the field to one
//! representative locator with [`first_image_locator`].

use serde_json::Value;

/// Return the first usable image locator, or `None` for "no image".
///
/// Total: malformed input degrades to the raw string or to `None`, it never
/// errors.
pub fn first_image_locator(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::Array(items) => first_string(items),
        Value::String(s) => locator_from_string(s),
        _ => None,
    }
}

fn locator_from_string(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Array(items)) => first_string(&items),
        // Anything else that parses (a bare number, a quoted string, an
        // object) or fails to parse is the locator itself.
        _ => Some(s.to_string()),
    }
}

fn first_string(items: &[Value]) -> Option<String> {
    match items.first() {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
