use super::*;
use crate::record::{ContentRecord, PublishStatus};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-test store. `late` records are only visible to the combined query,
/// as if they were written between the resolver's reads.
#[derive(Default)]
struct FixtureStore {
    records: Vec<ContentRecord>,
    late: Vec<ContentRecord>,
    reads: AtomicUsize,
    fail: bool,
}

impl FixtureStore {
    fn with(records: Vec<ContentRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    fn first<'a>(
        records: impl Iterator<Item = &'a ContentRecord>,
        kind: ContentKind,
        pred: impl Fn(&ContentRecord) -> bool,
    ) -> Option<ContentRecord> {
        records
            .filter(|r| r.kind == kind && r.is_published() && pred(*r))
            .min_by_key(|r| r.id)
            .cloned()
    }

    fn check(&self) -> Result<(), PolyglotError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PolyglotError::Store("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LocalizedStore for FixtureStore {
    type Record = ContentRecord;

    fn name(&self) -> &str {
        "fixture"
    }

    async fn find_first_published_where(
        &self,
        kind: ContentKind,
        condition: FieldCondition<'_>,
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        self.check()?;
        Ok(Self::first(self.records.iter(), kind, |r| {
            condition.matches(r)
        }))
    }

    async fn find_first_published_where_any(
        &self,
        kind: ContentKind,
        conditions: &[FieldCondition<'_>],
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        self.check()?;
        Ok(Self::first(
            self.records.iter().chain(self.late.iter()),
            kind,
            |r| conditions.iter().any(|c| c.matches(r)),
        ))
    }

    async fn list_published(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, PolyglotError> {
        self.check()?;
        let mut out: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.kind == kind && r.is_published())
            .cloned()
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }
}

fn locales() -> LocaleSettings {
    LocaleSettings::new("en", ["en", "id"]).unwrap()
}

fn page(id: i64, status: PublishStatus) -> ContentRecord {
    ContentRecord::new(id, ContentKind::Page, status)
}

fn about() -> ContentRecord {
    page(1, PublishStatus::Published)
        .with("slug", [("en", json!("about")), ("id", json!(null))])
        .unwrap()
        .with("title", [("en", json!("About")), ("id", json!("Tentang"))])
        .unwrap()
}

fn resolver(records: Vec<ContentRecord>) -> ContentResolver<FixtureStore> {
    ContentResolver::new(FixtureStore::with(records), locales())
}

#[tokio::test]
async fn test_exact_match() {
    let r = page(7, PublishStatus::Published)
        .with("slug", [("en", json!("about")), ("id", json!("tentang"))])
        .unwrap()
        .with("title", [("en", json!("About")), ("id", json!("Tentang"))])
        .unwrap();
    let resolver = resolver(vec![r]);

    let report = resolver.resolve(ContentKind::Page, "id", "tentang").await.unwrap();
    assert_eq!(report.content.as_ref().map(|c| c.id), Some(7));
    assert_eq!(report.matched_locale.as_deref(), Some("id"));
    assert!(!report.used_fallback);
    assert_eq!(report.fallback_type, FallbackType::Exact);
    assert!(!report.is_partial_translation);
    assert!(report.fallback_fields.is_empty());
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_default_locale_fallback() {
    let resolver = resolver(vec![about()]);

    let report = resolver.resolve(ContentKind::Page, "id", "about").await.unwrap();
    let content = report.content.as_ref().unwrap();
    assert_eq!(content.id, 1);
    assert_eq!(report.requested_locale, "id");
    assert_eq!(report.matched_locale.as_deref(), Some("en"));
    assert!(report.used_fallback);
    assert_eq!(report.fallback_type, FallbackType::DefaultLocale);

    // Title is translated, only the slug falls back.
    assert_eq!(
        crate::fields::get_field(content, "title", "id", resolver.locales()),
        Some(&json!("Tentang"))
    );
    assert_eq!(report.fallback_fields, ["slug"]);
    assert!(report.is_partial_translation);
    assert_eq!(report.field_sources[0].source_locale, "en");
}

#[tokio::test]
async fn test_partial_translation_reported() {
    let r = about()
        .with("content", [("en", json!("Full text")), ("id", json!(""))])
        .unwrap();
    let resolver = resolver(vec![r]);

    let report = resolver.resolve(ContentKind::Page, "id", "about").await.unwrap();
    assert!(report.is_partial_translation);
    assert!(report.fallback_fields.contains(&"content".to_string()));
}

#[tokio::test]
async fn test_default_locale_request_skips_second_query() {
    let resolver = resolver(vec![about()]);

    let report = resolver.resolve(ContentKind::Page, "en", "missing").await.unwrap();
    assert!(!report.is_found());
    // exact + combined; no separate default-locale read.
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_not_found() {
    let resolver = resolver(vec![about()]);

    let report = resolver.resolve(ContentKind::Page, "id", "nowhere").await.unwrap();
    assert!(report.content.is_none());
    assert_eq!(report.matched_locale, None);
    assert!(!report.used_fallback);
    assert_eq!(report.fallback_type, FallbackType::NotFound);
    assert_eq!(report.fallback_type.as_str(), "not_found");
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_only_published_records_match() {
    let draft = page(1, PublishStatus::Draft)
        .with("slug", [("en", json!("soon"))])
        .unwrap();
    let scheduled = page(2, PublishStatus::Scheduled)
        .with("slug", [("en", json!("soon"))])
        .unwrap();
    let resolver = resolver(vec![draft, scheduled]);

    let report = resolver.resolve(ContentKind::Page, "en", "soon").await.unwrap();
    assert!(report.content.is_none());
}

#[tokio::test]
async fn test_collections_are_separate() {
    let post = ContentRecord::new(9, ContentKind::Post, PublishStatus::Published)
        .with("slug", [("en", json!("about"))])
        .unwrap();
    let resolver = resolver(vec![post]);

    let report = resolver.resolve(ContentKind::Page, "en", "about").await.unwrap();
    assert!(report.content.is_none());
    let report = resolver.resolve(ContentKind::Post, "en", "about").await.unwrap();
    assert_eq!(report.content.map(|c| c.id), Some(9));
}

#[tokio::test]
async fn test_slug_match_is_case_sensitive() {
    let resolver = resolver(vec![about()]);
    let report = resolver.resolve(ContentKind::Page, "en", "About").await.unwrap();
    assert!(report.content.is_none());
}

#[tokio::test]
async fn test_lowest_id_wins_ties() {
    let a = page(5, PublishStatus::Published)
        .with("slug", [("en", json!("dup"))])
        .unwrap();
    let b = page(3, PublishStatus::Published)
        .with("slug", [("en", json!("dup"))])
        .unwrap();
    let resolver = resolver(vec![a, b]);

    let report = resolver.resolve(ContentKind::Page, "en", "dup").await.unwrap();
    assert_eq!(report.content.map(|c| c.id), Some(3));
}

#[tokio::test]
async fn test_cross_locale_match() {
    // Written between the first two reads; only the combined query sees it.
    let late = page(4, PublishStatus::Published)
        .with("slug", [("en", json!("late")), ("id", json!("terlambat"))])
        .unwrap();
    let store = FixtureStore {
        late: vec![late],
        ..Default::default()
    };
    let resolver = ContentResolver::new(store, locales());

    let report = resolver.resolve(ContentKind::Page, "id", "late").await.unwrap();
    assert_eq!(report.content.as_ref().map(|c| c.id), Some(4));
    assert_eq!(report.fallback_type, FallbackType::CrossLocale);
    assert_eq!(report.matched_locale.as_deref(), Some("en"));
    assert!(report.used_fallback);

    let report = resolver.resolve(ContentKind::Page, "id", "terlambat").await.unwrap();
    assert_eq!(report.fallback_type, FallbackType::CrossLocale);
    assert_eq!(report.matched_locale.as_deref(), Some("id"));
    assert!(!report.used_fallback);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let resolver = resolver(vec![about()]);
    let first = resolver.resolve(ContentKind::Page, "id", "about").await.unwrap();
    let second = resolver.resolve(ContentKind::Page, "id", "about").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_locale_is_config_error() {
    let resolver = resolver(vec![about()]);
    for locale in ["", "en\"", "$.slug"] {
        let err = resolver
            .resolve(ContentKind::Page, locale, "about")
            .await
            .unwrap_err();
        assert!(matches!(err, PolyglotError::Config(_)), "{locale:?}");
    }
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_slug_not_found_without_reads() {
    let resolver = resolver(vec![about()]);
    let report = resolver.resolve(ContentKind::Page, "en", "").await.unwrap();
    assert!(!report.is_found());
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_error_propagates() {
    let store = FixtureStore {
        records: vec![about()],
        fail: true,
        ..Default::default()
    };
    let resolver = ContentResolver::new(store, locales());

    let err = resolver
        .resolve(ContentKind::Page, "en", "about")
        .await
        .unwrap_err();
    assert!(matches!(err, PolyglotError::Store(ref m) if m == "connection reset"));
    assert_eq!(resolver.store().reads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_report_serializes_snake_case() {
    let report: FallbackReport<ContentRecord> = FallbackReport::not_found("id");
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["fallback_type"], "not_found");
    assert_eq!(v["content"], serde_json::Value::Null);
    assert_eq!(v["requested_locale"], "id");
}
