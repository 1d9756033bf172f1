//! Record writes. Editorial tooling owns content; these exist for seeding.

use super::queries::{decode_row, ContentRow, SELECT_COLUMNS};
use super::SqliteStore;
use chrono::SecondsFormat;
use polyglot_core::{ContentKind, ContentRecord, PolyglotError, PublishStatus, TranslatableRecord};
use serde_json::Value;

impl SqliteStore {
    /// Insert a record, replacing any record with the same id.
    pub async fn upsert_record(&self, record: &ContentRecord) -> Result<(), PolyglotError> {
        let translations = serde_json::to_string(&record.fields)?;
        let updated_at = record.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

        sqlx::query(
            "INSERT INTO contents (id, kind, status, translations, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET kind = excluded.kind, status = excluded.status, \
             translations = excluded.translations, updated_at = excluded.updated_at",
        )
        .bind(record.id)
        .bind(record.kind.as_str())
        .bind(record.status.as_str())
        .bind(&translations)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PolyglotError::Store(format!("upsert record {} failed: {e}", record.id)))?;

        Ok(())
    }

    /// Get a record by id regardless of status.
    pub async fn get_record(&self, id: i64) -> Result<Option<ContentRecord>, PolyglotError> {
        let row: Option<ContentRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PolyglotError::Store(format!("query failed: {e}")))?;

        row.map(decode_row).transpose()
    }

    /// Set one translation of a stored record.
    pub async fn set_translation(
        &self,
        id: i64,
        field: &str,
        locale: &str,
        value: Value,
    ) -> Result<(), PolyglotError> {
        let mut record = self
            .get_record(id)
            .await?
            .ok_or_else(|| PolyglotError::Store(format!("no record with id {id}")))?;
        record.set_translation(field, locale, value)?;
        self.upsert_record(&record).await
    }

    /// Change a record's status. Returns `true` if a row was updated.
    pub async fn set_status(&self, id: i64, status: PublishStatus) -> Result<bool, PolyglotError> {
        let result = sqlx::query("UPDATE contents SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PolyglotError::Store(format!("update status failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of records per status in a collection, for status output.
    pub async fn count_by_status(
        &self,
        kind: ContentKind,
    ) -> Result<Vec<(String, i64)>, PolyglotError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM contents WHERE kind = ? GROUP BY status ORDER BY status",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PolyglotError::Store(format!("query failed: {e}")))?;

        Ok(rows)
    }
}
