//! Database Module
//!
//! Document store abstraction, its SurrealDB and in-memory backends, and one
//! repository per collection.

pub mod memory;
pub mod repository;
pub mod store;
pub mod surreal;

pub use memory::MemoryStore;
pub use store::{
    Document, DocumentStore, FieldGuard, StoreError, StoreResult, UpdateOutcome, collections,
};
pub use surreal::SurrealStore;

use std::sync::Arc;
use std::time::Duration;

use crate::core::Config;

/// `STORE_URI` value selecting the in-process store
pub const MEMORY_URI: &str = "memory";

/// Shared store handle injected into every component
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Open the document store named by `config.store_uri`
///
/// Called exactly once at startup; the handle is then cloned into each component.
pub async fn connect_store(config: &Config) -> StoreResult<StoreHandle> {
    if config.store_uri == MEMORY_URI {
        tracing::warn!("Using in-memory document store, data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SurrealStore::connect(
        &config.store_uri,
        Duration::from_millis(config.store_timeout_ms),
        Duration::from_millis(config.store_bulk_timeout_ms),
    )
    .await?;
    Ok(Arc::new(store))
}
