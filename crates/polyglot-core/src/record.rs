//! Translatable content records and the capability trait the resolver works over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::PolyglotError;
use crate::locale::validate_locale_code;
use crate::translations::Translations;

/// Publication status of a record. Only `Published` records are ever resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
        }
    }
}

impl FromStr for PublishStatus {
    type Err = PolyglotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(PolyglotError::Config(format!("unknown status '{other}'"))),
        }
    }
}

/// Content collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Page,
    Post,
    Category,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Page, Self::Post, Self::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Post => "post",
            Self::Category => "category",
        }
    }

    /// Fields stored as per-locale maps for this collection.
    pub fn translatable_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Page => &[
                "title",
                "slug",
                "content",
                "excerpt",
                "meta_title",
                "meta_description",
                "custom_fields",
            ],
            Self::Post => &[
                "title",
                "slug",
                "content",
                "excerpt",
                "meta_title",
                "meta_description",
                "custom_fields",
            ],
            Self::Category => &["name", "slug", "description"],
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = PolyglotError;

    /// Unknown collection names are a configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "page" | "pages" => Ok(Self::Page),
            "post" | "posts" => Ok(Self::Post),
            "category" | "categories" => Ok(Self::Category),
            other => Err(PolyglotError::Config(format!(
                "unknown content collection '{other}'"
            ))),
        }
    }
}

/// Capability every record type implements to take part in locale fallback.
pub trait TranslatableRecord {
    /// Stable identifier; lower ids win ties between matching records.
    fn id(&self) -> i64;

    fn status(&self) -> PublishStatus;

    /// Names of the fields stored as per-locale maps.
    fn translatable_fields(&self) -> &[&'static str];

    /// Raw per-locale map for `field`, if the record has one.
    fn translations(&self, field: &str) -> Option<&Translations>;

    /// Replace the value of `field` at `locale`.
    fn set_translation(
        &mut self,
        field: &str,
        locale: &str,
        value: Value,
    ) -> Result<(), PolyglotError>;

    /// Raw stored value of `field` at `locale`, without any fallback.
    fn get_translation(&self, field: &str, locale: &str) -> Option<&Value> {
        self.translations(field).and_then(|t| t.get(locale))
    }

    fn is_published(&self) -> bool {
        self.status() == PublishStatus::Published
    }
}

/// A page, post, or category with translatable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: i64,
    pub kind: ContentKind,
    #[serde(default)]
    pub status: PublishStatus,
    /// Translatable fields keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, Translations>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Create an empty record.
    pub fn new(id: i64, kind: ContentKind, status: PublishStatus) -> Self {
        Self {
            id,
            kind,
            status,
            fields: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Builder-style variant of [`TranslatableRecord::set_translation`].
    pub fn with<'a>(
        mut self,
        field: &str,
        translations: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Self, PolyglotError> {
        for (locale, value) in translations {
            self.set_translation(field, locale, value)?;
        }
        Ok(self)
    }
}

impl TranslatableRecord for ContentRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn status(&self) -> PublishStatus {
        self.status
    }

    fn translatable_fields(&self) -> &[&'static str] {
        self.kind.translatable_fields()
    }

    fn translations(&self, field: &str) -> Option<&Translations> {
        self.fields.get(field)
    }

    fn set_translation(
        &mut self,
        field: &str,
        locale: &str,
        value: Value,
    ) -> Result<(), PolyglotError> {
        if !self.kind.translatable_fields().contains(&field) {
            return Err(PolyglotError::Config(format!(
                "'{field}' is not a translatable field of {}",
                self.kind
            )));
        }
        validate_locale_code(locale)?;
        self.fields
            .entry(field.to_string())
            .or_default()
            .set(locale, value);
        self.updated_at = Utc::now();
        Ok(())
    }
}
