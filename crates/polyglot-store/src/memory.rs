//! In-memory content store.

use async_trait::async_trait;
use polyglot_core::{
    ContentKind, ContentRecord, FieldCondition, LocalizedStore, PolyglotError, TranslatableRecord,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records held in memory, keyed (and therefore ordered) by id.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<i64, ContentRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records.
    pub fn from_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let map: BTreeMap<i64, ContentRecord> =
            records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a record.
    pub async fn insert(&self, record: ContentRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Get a record by id regardless of status.
    pub async fn get(&self, id: i64) -> Option<ContentRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Set one translation of a stored record.
    pub async fn set_translation(
        &self,
        id: i64,
        field: &str,
        locale: &str,
        value: Value,
    ) -> Result<(), PolyglotError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| PolyglotError::Store(format!("no record with id {id}")))?;
        record.set_translation(field, locale, value)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn first_where(
        &self,
        kind: ContentKind,
        pred: impl Fn(&ContentRecord) -> bool,
    ) -> Option<ContentRecord> {
        self.records
            .read()
            .await
            .values()
            .find(|r| r.kind == kind && r.is_published() && pred(*r))
            .cloned()
    }
}

#[async_trait]
impl LocalizedStore for MemoryStore {
    type Record = ContentRecord;

    fn name(&self) -> &str {
        "memory"
    }

    async fn find_first_published_where(
        &self,
        kind: ContentKind,
        condition: FieldCondition<'_>,
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        Ok(self.first_where(kind, |r| condition.matches(r)).await)
    }

    async fn find_first_published_where_any(
        &self,
        kind: ContentKind,
        conditions: &[FieldCondition<'_>],
    ) -> Result<Option<ContentRecord>, PolyglotError> {
        Ok(self
            .first_where(kind, |r| conditions.iter().any(|c| c.matches(r)))
            .await)
    }

    async fn list_published(&self, kind: ContentKind) -> Result<Vec<ContentRecord>, PolyglotError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.kind == kind && r.is_published())
            .cloned()
            .collect())
    }
}
