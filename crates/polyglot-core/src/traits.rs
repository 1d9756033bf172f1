use async_trait::async_trait;

use crate::{
    error::PolyglotError,
    record::{ContentKind, TranslatableRecord},
};

/// Equality filter on one locale of a translatable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCondition<'a> {
    pub field: &'a str,
    pub locale: &'a str,
    pub value: &'a str,
}

impl<'a> FieldCondition<'a> {
    pub fn new(field: &'a str, locale: &'a str, value: &'a str) -> Self {
        Self {
            field,
            locale,
            value,
        }
    }

    /// Whether `record` stores exactly `value` for this field and locale.
    pub fn matches<R: TranslatableRecord + ?Sized>(&self, record: &R) -> bool {
        record
            .translations(self.field)
            .is_some_and(|t| t.string_equals(self.locale, self.value))
    }
}

/// Read access to a content collection -- the store behind the resolver.
///
/// Every query is scoped to `Published` records of one collection. When more
/// than one record matches, implementations return the one with the lowest id.
#[async_trait]
pub trait LocalizedStore: Send + Sync {
    type Record: TranslatableRecord + Send + Sync;

    /// Human-readable store name.
    fn name(&self) -> &str;

    /// First published record where `condition` holds.
    async fn find_first_published_where(
        &self,
        kind: ContentKind,
        condition: FieldCondition<'_>,
    ) -> Result<Option<Self::Record>, PolyglotError>;

    /// First published record where any of `conditions` holds.
    async fn find_first_published_where_any(
        &self,
        kind: ContentKind,
        conditions: &[FieldCondition<'_>],
    ) -> Result<Option<Self::Record>, PolyglotError>;

    /// All published records of a collection, ordered by id.
    async fn list_published(&self, kind: ContentKind) -> Result<Vec<Self::Record>, PolyglotError>;
}
