//! Rules deciding whether a stored translation counts as "filled".
//!
//! Not filled:
//! - `null` and the literal string `"null"`
//! - strings that are empty after stripping markup and whitespace
//! - empty arrays and objects
//!
//! Markup carrying embedded media (`<img>`, `<video>`, ...) counts as content
//! even when no text remains after stripping tags.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid tag pattern"));

static MEDIA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(img|video|audio|iframe|embed|object|picture|svg)\b")
        .expect("valid media pattern")
});

/// Remove HTML tags and comments from `text`.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Whether a string holds visible content.
pub fn is_filled_str(text: &str) -> bool {
    if text.is_empty() || text == "null" {
        return false;
    }
    if !strip_tags(text).trim().is_empty() {
        return true;
    }
    MEDIA_RE.is_match(text)
}

/// Whether a stored translation value is filled.
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => is_filled_str(s),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
