//! Repository Module
//!
//! Typed access to each collection on top of [`DocumentStore`](super::DocumentStore).

pub mod booking;
pub mod catalog;
pub mod discount;
pub mod location;
pub mod payment;
pub mod sale;

pub use booking::BookingRepository;
pub use catalog::CatalogRepository;
pub use discount::DiscountRepository;
pub use location::LocationRepository;
pub use payment::PaymentRepository;
pub use sale::SaleRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::store::{Document, FieldGuard, StoreError, UpdateOutcome};
use super::StoreHandle;
use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database timeout: {0}")]
    Timeout(String),

    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => RepoError::Timeout(err.to_string()),
            StoreError::Duplicate { .. } => RepoError::Duplicate(err.to_string()),
            StoreError::Malformed(msg) => RepoError::Corrupt(msg),
            StoreError::Unavailable(_) | StoreError::InvalidQuery(_) => {
                RepoError::Database(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Corrupt(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Document store failure");
                AppError::store(msg)
            }
            RepoError::Timeout(msg) => {
                tracing::error!(error = %msg, "Document store timeout");
                AppError::store_timeout(msg)
            }
            RepoError::Corrupt(msg) => {
                tracing::error!(error = %msg, "Corrupt document in store");
                AppError::internal(format!("Corrupt document: {}", msg))
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Typed outcome of a (guarded) update
#[derive(Debug, Clone, PartialEq)]
pub enum Updated<T> {
    /// Applied; the entity after the write
    Applied(T),
    Missing,
    /// Guard failed; the entity as currently stored
    Rejected(T),
}

/// Base repository: one collection, typed through serde
#[derive(Clone)]
pub struct BaseRepository {
    store: StoreHandle,
    collection: &'static str,
}

impl BaseRepository {
    pub fn new(store: StoreHandle, collection: &'static str) -> Self {
        Self { store, collection }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    fn decode<T: DeserializeOwned>(doc: Document) -> RepoResult<T> {
        Ok(serde_json::from_value(doc)?)
    }

    pub async fn insert<T: Serialize>(&self, id: i64, entity: &T) -> RepoResult<()> {
        let doc = serde_json::to_value(entity)?;
        self.store.insert(self.collection, id, doc).await?;
        Ok(())
    }

    pub async fn find_by_id<T: DeserializeOwned>(&self, id: i64) -> RepoResult<Option<T>> {
        self.store
            .get(self.collection, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn find_all<T: DeserializeOwned>(&self) -> RepoResult<Vec<T>> {
        self.store
            .list(self.collection)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn find_by<T: DeserializeOwned>(
        &self,
        field: &'static str,
        value: impl Into<Value>,
    ) -> RepoResult<Vec<T>> {
        self.store
            .find_by_field(self.collection, field, value.into())
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn update<T: DeserializeOwned>(
        &self,
        id: i64,
        guard: Option<FieldGuard>,
        patch: Document,
    ) -> RepoResult<Updated<T>> {
        Ok(match self.store.update(self.collection, id, guard, patch).await? {
            UpdateOutcome::Updated(doc) => Updated::Applied(Self::decode(doc)?),
            UpdateOutcome::Missing => Updated::Missing,
            UpdateOutcome::Rejected(doc) => Updated::Rejected(Self::decode(doc)?),
        })
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.store.delete(self.collection, id).await?)
    }
}
