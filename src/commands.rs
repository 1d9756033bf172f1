//! Output rendering for CLI commands. Pure functions, no I/O.

use polyglot_core::{
    config::Config,
    fields::{alternate_slugs, get_field_str, translation_status},
    ContentKind, ContentRecord, FallbackReport, LocaleSettings,
};
use serde_json::{json, Value};

/// Resolution report plus the rendered title and alternate-locale slugs.
pub fn render_resolve(report: &FallbackReport<ContentRecord>, locales: &LocaleSettings) -> Value {
    let Some(record) = report.content.as_ref() else {
        return json!({ "report": report });
    };

    let title_field = match record.kind {
        ContentKind::Category => "name",
        ContentKind::Page | ContentKind::Post => "title",
    };
    let alternates: serde_json::Map<String, Value> = alternate_slugs(record, locales)
        .into_iter()
        .map(|(locale, slug)| (locale, Value::String(slug)))
        .collect();

    json!({
        "report": report,
        "title": get_field_str(record, title_field, &report.requested_locale, locales),
        "alternates": alternates,
    })
}

/// One line per (record, locale) that is not fully translated.
pub fn render_coverage(
    records: &[ContentRecord],
    locale: Option<&str>,
    locales: &LocaleSettings,
) -> String {
    let mut out = String::new();
    let mut incomplete = 0;

    for record in records {
        for coverage in translation_status(record, locales) {
            if locale.is_some_and(|l| l != coverage.locale) || coverage.missing.is_empty() {
                continue;
            }
            incomplete += 1;
            out.push_str(&format!(
                "#{} [{}] {}% missing: {}\n",
                record.id,
                coverage.locale,
                coverage.percent,
                coverage.missing.join(", ")
            ));
        }
    }

    if incomplete == 0 {
        out.push_str("All published records are fully translated.\n");
    }
    out
}

/// Configuration and per-collection record counts.
pub fn render_status(
    cfg: &Config,
    config_path: &str,
    store_name: &str,
    counts: &[(ContentKind, Vec<(String, i64)>)],
) -> String {
    let mut out = format!("{} -- Status\n\n", cfg.polyglot.name);
    out.push_str(&format!("Config: {config_path}\n"));
    out.push_str(&format!("Default locale: {}\n", cfg.locales.default));
    out.push_str(&format!(
        "Available locales: {}\n",
        cfg.locales.available.join(", ")
    ));
    out.push_str(&format!("Store: {store_name} ({})\n\n", cfg.store.db_path));

    for (kind, by_status) in counts {
        if by_status.is_empty() {
            out.push_str(&format!("  {kind}: none\n"));
            continue;
        }
        let parts: Vec<String> = by_status
            .iter()
            .map(|(status, n)| format!("{n} {status}"))
            .collect();
        out.push_str(&format!("  {kind}: {}\n", parts.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_core::{ContentRecord, FallbackType, PublishStatus};

    fn locales() -> LocaleSettings {
        LocaleSettings::new("en", ["en", "id"]).unwrap()
    }

    fn about() -> ContentRecord {
        ContentRecord::new(1, ContentKind::Page, PublishStatus::Published)
            .with("slug", [("en", json!("about")), ("id", json!("tentang"))])
            .unwrap()
            .with("title", [("en", json!("About")), ("id", json!(""))])
            .unwrap()
    }

    fn found_report(record: ContentRecord) -> FallbackReport<ContentRecord> {
        FallbackReport {
            content: Some(record),
            requested_locale: "id".into(),
            matched_locale: Some("id".into()),
            used_fallback: false,
            fallback_type: FallbackType::Exact,
            is_partial_translation: true,
            fallback_fields: vec!["title".into()],
            field_sources: Vec::new(),
        }
    }

    #[test]
    fn test_render_resolve_uses_field_fallback() {
        let out = render_resolve(&found_report(about()), &locales());
        assert_eq!(out["title"], "About");
        assert_eq!(out["alternates"]["en"], "about");
        assert_eq!(out["alternates"]["id"], "tentang");
        assert_eq!(out["report"]["fallback_type"], "exact");
    }

    #[test]
    fn test_render_resolve_not_found() {
        let report = FallbackReport {
            content: None,
            requested_locale: "id".into(),
            matched_locale: None,
            used_fallback: false,
            fallback_type: FallbackType::NotFound,
            is_partial_translation: false,
            fallback_fields: Vec::new(),
            field_sources: Vec::new(),
        };
        let out = render_resolve(&report, &locales());
        assert_eq!(out["report"]["fallback_type"], "not_found");
        assert!(out.get("title").is_none());
    }

    #[test]
    fn test_render_coverage() {
        let out = render_coverage(&[about()], None, &locales());
        assert_eq!(out, "#1 [id] 50% missing: title\n");

        let out = render_coverage(&[about()], Some("en"), &locales());
        assert_eq!(out, "All published records are fully translated.\n");
    }

    #[test]
    fn test_render_status() {
        let cfg = Config::default();
        let counts = vec![
            (ContentKind::Page, vec![("published".to_string(), 3)]),
            (ContentKind::Post, Vec::new()),
        ];
        let out = render_status(&cfg, "config.toml", "sqlite", &counts);
        assert!(out.contains("Default locale: en"));
        assert!(out.contains("  page: 3 published"));
        assert!(out.contains("  post: none"));
        assert!(out.starts_with("Polyglot -- Status\n\nConfig: config.toml\n"));
        assert!(out.contains("Store: sqlite (~/.polyglot/data/content.db)\n\n  page:"));
    }
}
