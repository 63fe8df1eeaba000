//! Payment Repository (append-only)

use shared::models::Payment;

use super::{BaseRepository, RepoResult};
use crate::db::store::collections;
use crate::db::StoreHandle;

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            base: BaseRepository::new(store, collections::PAYMENTS),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        self.base.find_all().await
    }

    pub async fn find_by_sale(&self, sale_id: i64) -> RepoResult<Vec<Payment>> {
        self.base.find_by("saleId", sale_id).await
    }

    pub async fn create(&self, payment: &Payment) -> RepoResult<()> {
        self.base.insert(payment.id, payment).await
    }
}
