//! Sale Repository (append-only)

use shared::models::Sale;

use super::{BaseRepository, RepoResult};
use crate::db::store::collections;
use crate::db::StoreHandle;

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            base: BaseRepository::new(store, collections::SALES),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Sale>> {
        self.base.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Sale>> {
        self.base.find_by_id(id).await
    }

    pub async fn create(&self, sale: &Sale) -> RepoResult<()> {
        self.base.insert(sale.id, sale).await
    }
}
