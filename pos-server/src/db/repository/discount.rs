//! Discount Repository

use shared::models::Discount;

use super::{BaseRepository, RepoResult, Updated};
use crate::db::store::collections;
use crate::db::StoreHandle;

#[derive(Clone)]
pub struct DiscountRepository {
    base: BaseRepository,
}

impl DiscountRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            base: BaseRepository::new(store, collections::DISCOUNTS),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Discount>> {
        self.base.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Discount>> {
        self.base.find_by_id(id).await
    }

    /// Code-type discounts carrying exactly `code`
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Vec<Discount>> {
        self.base.find_by("code", code).await
    }

    pub async fn create(&self, discount: &Discount) -> RepoResult<()> {
        self.base.insert(discount.id, discount).await
    }

    /// Overwrite every mutable field with those of `discount`
    pub async fn replace(&self, discount: &Discount) -> RepoResult<Updated<Discount>> {
        let mut patch = serde_json::to_value(discount)?;
        if let Some(fields) = patch.as_object_mut() {
            // Fields absent from the serialized form must be cleared explicitly
            for key in ["code", "percent", "amount", "expiresAt"] {
                fields.entry(key).or_insert(serde_json::Value::Null);
            }
        }
        self.base.update(discount.id, None, patch).await
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.base.delete(id).await
    }
}
