//! Location Repository

use shared::models::Location;

use super::{BaseRepository, RepoResult, Updated};
use crate::db::store::{Document, collections};
use crate::db::StoreHandle;

#[derive(Clone)]
pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            base: BaseRepository::new(store, collections::LOCATIONS),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Location>> {
        self.base.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Location>> {
        self.base.find_by_id(id).await
    }

    pub async fn find_by_link_code(&self, code: &str) -> RepoResult<Option<Location>> {
        let mut found: Vec<Location> = self.base.find_by("linkCode", code).await?;
        if found.len() > 1 {
            tracing::warn!(count = found.len(), "Link code shared by several locations");
        }
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        })
    }

    pub async fn create(&self, location: &Location) -> RepoResult<()> {
        self.base.insert(location.id, location).await
    }

    pub async fn update(&self, id: i64, patch: Document) -> RepoResult<Updated<Location>> {
        self.base.update(id, None, patch).await
    }
}
