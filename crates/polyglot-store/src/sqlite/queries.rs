//! Published-record lookups.

use super::SqliteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use polyglot_core::{
    locale::validate_locale_code, ContentKind, ContentRecord, FieldCondition, LocalizedStore,
    PolyglotError, PublishStatus,
};
use std::collections::BTreeMap;

/// Row shape: id, kind, status, translations, updated_at.
pub(super) type ContentRow = (i64, String, String, String, String);

pub(super) const SELECT_COLUMNS: &str =
    "SELECT id, kind, status, translations, updated_at FROM contents";

/// JSON path addressing `translations.<field>.<locale>`.
pub(super) fn json_path(field: &str, locale: &str) -> Result<String, PolyglotError> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(PolyglotError::Config(format!("invalid field name '{field}'")));
    }
    validate_locale_code(locale)?;
    Ok(format!("$.\"{field}\".\"{locale}\""))
}

pub(super) fn decode_row(row: ContentRow) -> Result<ContentRecord, PolyglotError> {
    let (id, kind, status, translations, updated_at) = row;
    let kind = kind
        .parse::<ContentKind>()
        .map_err(|e| PolyglotError::Store(format!("record {id}: {e}")))?;
    let status = status
        .parse::<PublishStatus>()
        .map_err(|e| PolyglotError::Store(format!("record {id}: {e}")))?;
    let fields: BTreeMap<_, _> = serde_json::from_str(&translations)
        .map_err(|e| PolyglotError::Store(format!("record {id}: bad translations: {e}")))?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| PolyglotError::Store(format!("record {id}: bad updated_at: {e}")))?;

    Ok(ContentRecord {
        id,
        kind,
        status,
        fields,
        updated_at,
    })
}

#[async_trait]
impl LocalizedStore for SqliteStore {
    type Record = ContentRecord;

    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find_first_published_where(
        &self,
        kind: ContentKind,
        condition: FieldCondition<'_>,
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        self.find_first_published_where_any(kind, &[condition])
            .await
    }

    async fn find_first_published_where_any(
        &self,
        kind: ContentKind,
        conditions: &[FieldCondition<'_>],
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        if conditions.is_empty() {
            return Ok(None);
        }

        let paths = conditions
            .iter()
            .map(|c| json_path(c.field, c.locale))
            .collect::<Result<Vec<_>, _>>()?;

        // Only JSON strings match; json_extract returns arrays and objects as text.
        let filter = vec![
            "(json_type(translations, ?) = 'text' AND json_extract(translations, ?) = ?)";
            conditions.len()
        ]
        .join(" OR ");
        let sql = format!(
            "{SELECT_COLUMNS} WHERE kind = ? AND status = 'published' AND ({filter}) \
             ORDER BY id ASC LIMIT 1"
        );

        let mut query = sqlx::query_as::<_, ContentRow>(&sql).bind(kind.as_str());
        for (path, condition) in paths.iter().zip(conditions) {
            query = query
                .bind(path.as_str())
                .bind(path.as_str())
                .bind(condition.value);
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PolyglotError::Store(format!("query failed: {e}")))?;

        row.map(decode_row).transpose()
    }

    async fn list_published(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, PolyglotError> {
        let rows: Vec<ContentRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE kind = ? AND status = 'published' ORDER BY id ASC"
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PolyglotError::Store(format!("query failed: {e}")))?;

        rows.into_iter().map(decode_row).collect()
    }
}
