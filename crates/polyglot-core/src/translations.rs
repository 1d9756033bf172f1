//! Per-locale value maps for translatable fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::filled::is_filled;

/// A translatable field's values keyed by locale code.
///
/// Locales keep their insertion order, which is the order used when scanning
/// "any other locale" for a fallback value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(Map<String, Value>);

impl Translations {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Raw value stored for `locale`, filled or not.
    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.0.get(locale)
    }

    /// Set the value for `locale`. An existing locale keeps its position.
    pub fn set(&mut self, locale: impl Into<String>, value: Value) {
        self.0.insert(locale.into(), value);
    }

    /// The value for `locale` when it is filled.
    pub fn filled(&self, locale: &str) -> Option<&Value> {
        self.0.get(locale).filter(|v| is_filled(v))
    }

    pub fn is_filled(&self, locale: &str) -> bool {
        self.filled(locale).is_some()
    }

    /// Whether `locale` maps to exactly the string `value`.
    pub fn string_equals(&self, locale: &str, value: &str) -> bool {
        matches!(self.0.get(locale), Some(Value::String(s)) if s == value)
    }

    /// Locale codes in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Filled values in insertion order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(_, v)| is_filled(v))
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut t = Self::new();
        for (locale, value) in iter {
            t.set(locale, value);
        }
        t
    }
}
