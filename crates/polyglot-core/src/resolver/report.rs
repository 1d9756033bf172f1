use serde::Serialize;

use crate::fields::FieldFallback;

/// How the slug was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackType {
    /// Slug matched in the requested locale.
    Exact,
    /// Slug matched in the default locale.
    DefaultLocale,
    /// Slug matched by the combined requested-or-default query.
    CrossLocale,
    NotFound,
}

impl FallbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::DefaultLocale => "default_locale",
            Self::CrossLocale => "cross_locale",
            Self::NotFound => "not_found",
        }
    }
}

/// Result of resolving a slug in a locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackReport<R> {
    /// Matched record, `None` when nothing matched.
    pub content: Option<R>,
    pub requested_locale: String,
    /// Locale whose slug value matched.
    pub matched_locale: Option<String>,
    /// Whether the slug matched in a locale other than the requested one.
    pub used_fallback: bool,
    pub fallback_type: FallbackType,
    /// At least one field is shown from another locale.
    pub is_partial_translation: bool,
    /// Names of fields shown from another locale.
    pub fallback_fields: Vec<String>,
    /// Source locale of each fallback field.
    pub field_sources: Vec<FieldFallback>,
}

impl<R> FallbackReport<R> {
    pub(crate) fn not_found(requested_locale: &str) -> Self {
        Self {
            content: None,
            requested_locale: requested_locale.to_string(),
            matched_locale: None,
            used_fallback: false,
            fallback_type: FallbackType::NotFound,
            is_partial_translation: false,
            fallback_fields: Vec::new(),
            field_sources: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.content.is_some()
    }
}
