//! In-process document store
//!
//! Backs tests and `STORE_URI=memory`. Each collection lives in one DashMap
//! entry; holding the entry's write guard serializes writers on that
//! collection, which gives guarded updates their atomicity.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;

use super::store::{
    Document, DocumentStore, FieldGuard, StoreError, StoreResult, UpdateOutcome, merge_patch,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, BTreeMap<i64, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: i64, doc: Document) -> StoreResult<()> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }
        docs.insert(id, doc);
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: &str,
        docs: Vec<(i64, Document)>,
    ) -> StoreResult<usize> {
        let mut stored = self.collections.entry(collection.to_string()).or_default();
        if let Some((id, _)) = docs.iter().find(|(id, _)| stored.contains_key(id)) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id: *id,
            });
        }
        let count = docs.len();
        stored.extend(docs);
        Ok(count)
    }

    async fn get(&self, collection: &str, id: i64) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&id).cloned()))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &'static str,
        value: Value,
    ) -> StoreResult<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| doc.get(field) == Some(&value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: &str,
        id: i64,
        guard: Option<FieldGuard>,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(UpdateOutcome::Missing);
        };
        let Some(doc) = docs.get_mut(&id) else {
            return Ok(UpdateOutcome::Missing);
        };
        if let Some(guard) = &guard
            && !guard.matches(doc)
        {
            return Ok(UpdateOutcome::Rejected(doc.clone()));
        }
        merge_patch(doc, &patch)?;
        Ok(UpdateOutcome::Updated(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: i64) -> StoreResult<bool> {
        Ok(self
            .collections
            .get_mut(collection)
            .map(|mut docs| docs.remove(&id).is_some())
            .unwrap_or(false))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
