//! Booking Repository

use shared::models::{Booking, BookingStatus};

use super::{BaseRepository, RepoResult, Updated};
use crate::db::store::{Document, FieldGuard, collections};
use crate::db::StoreHandle;

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            base: BaseRepository::new(store, collections::BOOKINGS),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        self.base.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Booking>> {
        self.base.find_by_id(id).await
    }

    pub async fn create(&self, booking: &Booking) -> RepoResult<()> {
        self.base.insert(booking.id, booking).await
    }

    /// Apply `patch` only if the stored status is still `open`
    ///
    /// This is the serialization point for concurrent close/cancel requests.
    pub async fn update_while_open(&self, id: i64, patch: Document) -> RepoResult<Updated<Booking>> {
        let guard = FieldGuard::new("status", BookingStatus::Open.as_str());
        self.base.update(id, Some(guard), patch).await
    }
}
