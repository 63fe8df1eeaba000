//! Catalog Repository
//!
//! Read and seed access to collections owned by external CRUD services
//! (products, categories, users, roles). Documents stay opaque JSON.

use serde_json::Value;

use super::RepoResult;
use crate::db::StoreHandle;
use crate::db::store::Document;

#[derive(Clone)]
pub struct CatalogRepository {
    store: StoreHandle,
}

impl CatalogRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Point-in-time read of a whole collection
    pub async fn list(&self, collection: &str) -> RepoResult<Vec<Value>> {
        Ok(self.store.list(collection).await?)
    }

    /// Bulk insert; each document must carry an integer `id`
    pub async fn seed(&self, collection: &str, docs: Vec<Document>) -> RepoResult<usize> {
        let keyed = docs
            .into_iter()
            .filter_map(|doc| crate::db::store::document_id(&doc).map(|id| (id, doc)))
            .collect();
        Ok(self.store.insert_many(collection, keyed).await?)
    }
}
