//! Document store abstraction
//!
//! Every collection holds JSON documents keyed by a snowflake `i64`. Each
//! document also carries its own `id` field. The store guarantees
//! single-document atomicity only; there are no multi-document transactions.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// A stored document (always a JSON object)
pub type Document = Value;

/// Collection names
pub mod collections {
    pub const BOOKINGS: &str = "bookings";
    pub const DISCOUNTS: &str = "discounts";
    pub const SALES: &str = "sales";
    pub const PAYMENTS: &str = "payments";
    pub const LOCATIONS: &str = "locations";

    // Catalog collections owned by external CRUD services
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const USERS: &str = "users";
    pub const ROLES: &str = "roles";
}

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Document {collection}:{id} already exists")]
    Duplicate { collection: String, id: i64 },

    #[error("Invalid store query: {0}")]
    InvalidQuery(String),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Precondition on a single top-level field, checked atomically with the write
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGuard {
    pub field: &'static str,
    pub equals: Value,
}

impl FieldGuard {
    pub fn new(field: &'static str, equals: impl Into<Value>) -> Self {
        Self {
            field,
            equals: equals.into(),
        }
    }

    /// Whether `doc` satisfies the guard
    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(self.field) == Some(&self.equals)
    }
}

/// Outcome of a guarded update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Patch applied; holds the document after the write
    Updated(Document),
    /// No document with that id
    Missing,
    /// Guard did not hold; holds the current document, unchanged
    Rejected(Document),
}

/// Shallow merge: top-level keys of `patch` overwrite those of `doc`
///
/// A `null` in the patch removes the key. The `id` key is never overwritten.
pub fn merge_patch(doc: &mut Document, patch: &Document) -> StoreResult<()> {
    let target = doc
        .as_object_mut()
        .ok_or_else(|| StoreError::Malformed("stored document is not an object".into()))?;
    let patch = patch
        .as_object()
        .ok_or_else(|| StoreError::Malformed("patch is not an object".into()))?;
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

/// Build a patch document from field/value pairs
pub fn patch<const N: usize>(fields: [(&str, Value); N]) -> Document {
    let mut map = Map::with_capacity(N);
    for (key, value) in fields {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}

/// Identity carried inside a document
pub fn document_id(doc: &Document) -> Option<i64> {
    doc.get("id").and_then(Value::as_i64)
}

/// JSON document store
///
/// Implementations must make `update` atomic with respect to its guard:
/// two concurrent guarded updates on the same document can never both succeed
/// when the first one invalidates the guard of the second.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Insert a new document; fails with [`StoreError::Duplicate`] if `id` exists
    async fn insert(&self, collection: &str, id: i64, doc: Document) -> StoreResult<()>;

    /// Bulk insert (seeding); runs under the bulk timeout
    async fn insert_many(&self, collection: &str, docs: Vec<(i64, Document)>)
    -> StoreResult<usize>;

    async fn get(&self, collection: &str, id: i64) -> StoreResult<Option<Document>>;

    /// All documents of a collection, ordered by id
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Documents whose top-level `field` equals `value`, ordered by id
    async fn find_by_field(
        &self,
        collection: &str,
        field: &'static str,
        value: Value,
    ) -> StoreResult<Vec<Document>>;

    /// Shallow-merge `patch` into a document, optionally guarded
    async fn update(
        &self,
        collection: &str,
        id: i64,
        guard: Option<FieldGuard>,
        patch: Document,
    ) -> StoreResult<UpdateOutcome>;

    /// Delete a document; returns whether it existed
    async fn delete(&self, collection: &str, id: i64) -> StoreResult<bool>;

    /// Connectivity check
    async fn ping(&self) -> StoreResult<()>;
}
