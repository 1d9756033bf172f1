//! Field-level reads with locale fallback, and partial-translation detection.
//!
//! Every user-facing read of a translatable attribute goes through
//! [`get_field`]; raw storage access is [`TranslatableRecord::get_translation`].

use serde::Serialize;
use serde_json::Value;

use crate::locale::LocaleSettings;
use crate::record::TranslatableRecord;

/// A field shown in a locale other than the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFallback {
    pub field: String,
    /// Locale whose value is shown instead.
    pub source_locale: String,
}

/// Translation coverage of one record in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleCoverage {
    pub locale: String,
    pub filled: Vec<String>,
    pub missing: Vec<String>,
    /// Share of translatable fields filled, 0-100.
    pub percent: u8,
}

/// Read `field` for `locale`, falling back when the value is not filled.
///
/// Order: the requested locale, then the default locale, then the first
/// filled locale in the record's stored order. `None` when nothing is filled.
pub fn get_field<'r, R: TranslatableRecord + ?Sized>(
    record: &'r R,
    field: &str,
    locale: &str,
    locales: &LocaleSettings,
) -> Option<&'r Value> {
    get_field_with_source(record, field, locale, locales).map(|(_, v)| v)
}

/// Like [`get_field`], also returning the locale the value came from.
pub fn get_field_with_source<'r, R: TranslatableRecord + ?Sized>(
    record: &'r R,
    field: &str,
    locale: &str,
    locales: &LocaleSettings,
) -> Option<(&'r str, &'r Value)> {
    let translations = record.translations(field)?;

    if let Some((key, value)) = translations.iter_filled().find(|(l, _)| *l == locale) {
        return Some((key, value));
    }

    let default = locales.default_locale();
    if locale != default {
        if let Some(found) = translations.iter_filled().find(|(l, _)| *l == default) {
            return Some(found);
        }
    }

    translations.iter_filled().next()
}

/// Read `field` as text, for template rendering.
pub fn get_field_str<'r, R: TranslatableRecord + ?Sized>(
    record: &'r R,
    field: &str,
    locale: &str,
    locales: &LocaleSettings,
) -> Option<&'r str> {
    get_field(record, field, locale, locales).and_then(Value::as_str)
}

/// Fields not filled in `locale` but shown from another locale.
pub fn fallback_fields<R: TranslatableRecord + ?Sized>(
    record: &R,
    locale: &str,
    locales: &LocaleSettings,
) -> Vec<FieldFallback> {
    record
        .translatable_fields()
        .iter()
        .filter_map(|field| {
            let (source, _) = get_field_with_source(record, field, locale, locales)?;
            (source != locale).then(|| FieldFallback {
                field: (*field).to_string(),
                source_locale: source.to_string(),
            })
        })
        .collect()
}

/// Whether at least one field of `record` falls back for `locale`.
pub fn is_partial_translation<R: TranslatableRecord + ?Sized>(
    record: &R,
    locale: &str,
    locales: &LocaleSettings,
) -> bool {
    !fallback_fields(record, locale, locales).is_empty()
}

/// Coverage of `record` for every available locale.
///
/// Only fields filled in at least one locale count towards the total.
pub fn translation_status<R: TranslatableRecord + ?Sized>(
    record: &R,
    locales: &LocaleSettings,
) -> Vec<LocaleCoverage> {
    let relevant: Vec<&str> = record
        .translatable_fields()
        .iter()
        .copied()
        .filter(|f| {
            record
                .translations(f)
                .is_some_and(|t| t.iter_filled().next().is_some())
        })
        .collect();

    locales
        .available()
        .iter()
        .map(|locale| {
            let (filled, missing): (Vec<&str>, Vec<&str>) = relevant.iter().copied().partition(|f| {
                record
                    .translations(f)
                    .is_some_and(|t| t.is_filled(locale))
            });
            let percent = if relevant.is_empty() {
                100
            } else {
                (filled.len() * 100 / relevant.len()) as u8
            };
            LocaleCoverage {
                locale: locale.clone(),
                filled: filled.into_iter().map(String::from).collect(),
                missing: missing.into_iter().map(String::from).collect(),
                percent,
            }
        })
        .collect()
}

/// Slug per available locale, skipping locales without a filled slug.
///
/// Callers use this for language switchers and alternate links.
pub fn alternate_slugs<R: TranslatableRecord + ?Sized>(
    record: &R,
    locales: &LocaleSettings,
) -> Vec<(String, String)> {
    let Some(slugs) = record.translations("slug") else {
        return Vec::new();
    };
    locales
        .available()
        .iter()
        .filter_map(|locale| {
            let slug = slugs.filled(locale)?.as_str()?;
            Some((locale.clone(), slug.to_string()))
        })
        .collect()
}
