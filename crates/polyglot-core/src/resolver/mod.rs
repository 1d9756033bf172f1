//! Content resolution -- find the record for a (locale, slug) pair and report
//! which locales its values come from.

mod report;

#[cfg(test)]
mod tests;

pub use report::{FallbackReport, FallbackType};

use tracing::debug;

use crate::{
    error::PolyglotError,
    fields::fallback_fields,
    locale::{validate_locale_code, LocaleSettings},
    record::{ContentKind, TranslatableRecord},
    traits::{FieldCondition, LocalizedStore},
};

/// Translatable field holding the URL slug.
pub const SLUG_FIELD: &str = "slug";

/// Resolves slugs against a [`LocalizedStore`] with locale fallback.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
pub struct ContentResolver<S> {
    store: S,
    locales: LocaleSettings,
}

impl<S: LocalizedStore> ContentResolver<S> {
    pub fn new(store: S, locales: LocaleSettings) -> Self {
        Self { store, locales }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn locales(&self) -> &LocaleSettings {
        &self.locales
    }

    /// Find the published record of `kind` whose slug is `slug`.
    ///
    /// Tries, in order: the requested locale, the default locale, then either
    /// of the two in a single query. At most three store reads. A missing
    /// record is not an error; the report's `content` is `None`.
    pub async fn resolve(
        &self,
        kind: ContentKind,
        requested_locale: &str,
        slug: &str,
    ) -> Result<FallbackReport<S::Record>, PolyglotError> {
        validate_locale_code(requested_locale)?;
        if slug.is_empty() {
            debug!("resolve {kind}: empty slug, not found");
            return Ok(FallbackReport::not_found(requested_locale));
        }

        let default_locale = self.locales.default_locale();

        // 1. Exact match in the requested locale.
        let exact = FieldCondition::new(SLUG_FIELD, requested_locale, slug);
        if let Some(record) = self.store.find_first_published_where(kind, exact).await? {
            debug!(
                "resolve {kind} '{slug}' [{requested_locale}]: exact match id={}",
                record.id()
            );
            return Ok(self.report(
                record,
                requested_locale,
                requested_locale,
                FallbackType::Exact,
            ));
        }

        // 2. Default-locale match.
        let by_default = FieldCondition::new(SLUG_FIELD, default_locale, slug);
        if requested_locale != default_locale {
            if let Some(record) = self
                .store
                .find_first_published_where(kind, by_default)
                .await?
            {
                debug!(
                    "resolve {kind} '{slug}' [{requested_locale}]: default locale match id={}",
                    record.id()
                );
                return Ok(self.report(
                    record,
                    requested_locale,
                    default_locale,
                    FallbackType::DefaultLocale,
                ));
            }
        }

        // 3. Either locale, for records whose slug data is inconsistent.
        if let Some(record) = self
            .store
            .find_first_published_where_any(kind, &[exact, by_default])
            .await?
        {
            let matched = if exact.matches(&record) {
                requested_locale
            } else {
                default_locale
            };
            debug!(
                "resolve {kind} '{slug}' [{requested_locale}]: cross-locale match id={} ({matched})",
                record.id()
            );
            return Ok(self.report(
                record,
                requested_locale,
                matched,
                FallbackType::CrossLocale,
            ));
        }

        debug!("resolve {kind} '{slug}' [{requested_locale}]: not found");
        Ok(FallbackReport::not_found(requested_locale))
    }

    fn report(
        &self,
        record: S::Record,
        requested_locale: &str,
        matched_locale: &str,
        fallback_type: FallbackType,
    ) -> FallbackReport<S::Record> {
        let field_sources = fallback_fields(&record, requested_locale, &self.locales);
        FallbackReport {
            requested_locale: requested_locale.to_string(),
            matched_locale: Some(matched_locale.to_string()),
            used_fallback: matched_locale != requested_locale,
            fallback_type,
            is_partial_translation: !field_sources.is_empty(),
            fallback_fields: field_sources.iter().map(|f| f.field.clone()).collect(),
            field_sources,
            content: Some(record),
        }
    }
}
