//! TerminalRegistry

use std::time::Duration;

use serde_json::Value;
use shared::models::{
    HeartbeatRequest, HeartbeatResponse, InitialData, LinkRequest, LinkResponse, Location,
    LocationCreate, LocationView,
};
use shared::util::{now_millis, snowflake_id};
use tracing::{debug, info, warn};

use super::link_code;
use crate::db::StoreHandle;
use crate::db::{collections, store::patch};
use crate::db::repository::{CatalogRepository, LocationRepository, Updated};
use crate::utils::validation::{self, MAX_NAME_LEN, require, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Attempts at drawing a link code not already in use
const LINK_CODE_ATTEMPTS: usize = 10;

/// User document fields never sent to a till
const SECRET_USER_FIELDS: [&str; 2] = ["pin", "password"];

fn location_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::LocationNotFound, format!("Location {} not found", id))
        .with_detail("locationId", id)
}

/// `lastSeen` strictly increases even when two stamps land in the same millisecond
fn next_seen(previous: Option<i64>, now: i64) -> i64 {
    match previous {
        Some(prev) => now.max(prev + 1),
        None => now,
    }
}

fn strip_secrets(mut user: Value) -> Value {
    if let Some(fields) = user.as_object_mut() {
        for key in SECRET_USER_FIELDS {
            fields.remove(key);
        }
    }
    user
}

/// Terminal registry
#[derive(Clone)]
pub struct TerminalRegistry {
    locations: LocationRepository,
    catalog: CatalogRepository,
    heartbeat_timeout: Duration,
}

impl TerminalRegistry {
    pub fn new(store: StoreHandle, heartbeat_timeout: Duration) -> Self {
        Self {
            locations: LocationRepository::new(store.clone()),
            catalog: CatalogRepository::new(store),
            heartbeat_timeout,
        }
    }

    // ========== Locations ==========

    /// Create a location with a fresh unique link code
    pub async fn create_location(&self, payload: LocationCreate) -> AppResult<Location> {
        let name = require(payload.name, "name")?;
        validate_required_text(&name, "name", MAX_NAME_LEN)?;

        let link_code = self.allocate_link_code().await?;
        let location = Location {
            id: snowflake_id(),
            name: name.trim().to_string(),
            link_code,
            linked: false,
            device_info: None,
            last_seen: None,
            created_at: now_millis(),
        };
        self.locations.create(&location).await?;

        info!(location_id = location.id, name = %location.name, "Location created");
        Ok(location)
    }

    pub async fn list_locations(&self) -> AppResult<Vec<LocationView>> {
        let now = now_millis();
        let window = self.heartbeat_timeout.as_millis() as i64;
        Ok(self
            .locations
            .find_all()
            .await?
            .into_iter()
            .map(|location| {
                let online = location.linked
                    && location
                        .last_seen
                        .is_some_and(|seen| now.saturating_sub(seen) <= window);
                LocationView { location, online }
            })
            .collect())
    }

    pub async fn get_location(&self, id: i64) -> AppResult<Location> {
        self.locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| location_not_found(id))
    }

    /// Whether `id` names a linked location
    pub async fn is_linked(&self, id: i64) -> AppResult<bool> {
        Ok(self
            .locations
            .find_by_id(id)
            .await?
            .is_some_and(|location| location.linked))
    }

    async fn allocate_link_code(&self) -> AppResult<String> {
        for attempt in 1..=LINK_CODE_ATTEMPTS {
            let code = link_code::generate();
            if self.locations.find_by_link_code(&code).await?.is_none() {
                return Ok(code);
            }
            debug!(attempt, "Link code collision, drawing again");
        }
        Err(AppError::internal("Could not allocate a unique link code"))
    }

    // ========== Protocol ==========

    /// Link a till to the location owning `linkCode`
    ///
    /// Lookup failures come back as `success: false`. Presenting a code that
    /// is already linked re-authenticates the same location.
    pub async fn link(&self, request: LinkRequest) -> AppResult<LinkResponse> {
        let code = request
            .link_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                AppError::validation("linkCode is required").with_detail("field", "linkCode")
            })?;

        if !link_code::is_well_formed(code) {
            warn!(code_len = code.len(), "Rejected malformed link code");
            return Ok(LinkResponse::failed(ErrorCode::InvalidLinkCode));
        }

        let Some(location) = self.locations.find_by_link_code(code).await? else {
            warn!("Link attempt with unknown code");
            return Ok(LinkResponse::failed(ErrorCode::InvalidLinkCode));
        };

        if location.linked {
            info!(
                target: "audit",
                location_id = location.id,
                "Link code presented again, re-authenticating terminal"
            );
        }

        let mut fields = patch([
            ("linked", Value::Bool(true)),
            ("lastSeen", Value::from(next_seen(location.last_seen, now_millis()))),
        ]);
        if let Some(device_info) = request.device_info {
            fields["deviceInfo"] = device_info;
        }

        let linked = match self.locations.update(location.id, fields).await? {
            Updated::Applied(linked) | Updated::Rejected(linked) => linked,
            Updated::Missing => return Ok(LinkResponse::failed(ErrorCode::InvalidLinkCode)),
        };

        let snapshot = self.snapshot().await?;
        info!(
            location_id = linked.id,
            products = snapshot.products.len(),
            users = snapshot.users.len(),
            "Terminal linked"
        );
        Ok(LinkResponse::linked(linked.id, snapshot))
    }

    /// Refresh liveness of a linked till
    pub async fn heartbeat(&self, request: HeartbeatRequest) -> AppResult<HeartbeatResponse> {
        let raw = require(request.till_id, "tillId")?;
        let id = validation::parse_id(raw.trim(), "till")?;

        let location = match self.locations.find_by_id(id).await? {
            Some(location) if location.linked => location,
            _ => {
                debug!(till_id = id, "Heartbeat from unknown terminal");
                return Ok(HeartbeatResponse::failed(ErrorCode::UnknownTerminal));
            }
        };

        let mut fields = patch([(
            "lastSeen",
            Value::from(next_seen(location.last_seen, now_millis())),
        )]);
        if let Some(device_info) = request.device_info {
            fields["deviceInfo"] = device_info;
        }

        match self.locations.update(id, fields).await? {
            Updated::Applied(_) | Updated::Rejected(_) => Ok(HeartbeatResponse::ok()),
            Updated::Missing => Ok(HeartbeatResponse::failed(ErrorCode::UnknownTerminal)),
        }
    }

    /// Point-in-time bootstrap snapshot of the catalog collections
    pub async fn snapshot(&self) -> AppResult<InitialData> {
        let (products, categories, users, roles) = futures::try_join!(
            self.catalog.list(collections::PRODUCTS),
            self.catalog.list(collections::CATEGORIES),
            self.catalog.list(collections::USERS),
            self.catalog.list(collections::ROLES),
        )?;
        Ok(InitialData {
            products,
            categories,
            users: users.into_iter().map(strip_secrets).collect(),
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DocumentStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;

    async fn create_test_registry() -> (TerminalRegistry, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_many(
                collections::PRODUCTS,
                vec![(1, json!({"id": 1, "name": "Coffee", "price": 2.5}))],
            )
            .await
            .unwrap();
        store
            .insert_many(
                collections::USERS,
                vec![(
                    2,
                    json!({"id": 2, "name": "Ana", "pin": "1234", "password": "x", "roleId": 3}),
                )],
            )
            .await
            .unwrap();
        store
            .insert_many(collections::ROLES, vec![(3, json!({"id": 3, "name": "admin"}))])
            .await
            .unwrap();
        let registry = TerminalRegistry::new(store.clone(), Duration::from_secs(90));
        (registry, store)
    }

    fn link_request(code: &str) -> LinkRequest {
        LinkRequest {
            link_code: Some(code.to_string()),
            device_info: Some(json!({"os": "android", "version": "14"})),
        }
    }

    async fn bar(registry: &TerminalRegistry) -> Location {
        registry
            .create_location(LocationCreate {
                name: Some("Bar".into()),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_location_issues_code() {
        let (registry, _) = create_test_registry().await;
        let location = bar(&registry).await;
        assert!(link_code::is_well_formed(&location.link_code));
        assert!(!location.linked);

        let listed = registry.list_locations().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].online);

        let err = registry
            .create_location(LocationCreate { name: None })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_link_success_and_snapshot() {
        let (registry, _) = create_test_registry().await;
        let location = bar(&registry).await;

        let response = registry.link(link_request(&location.link_code)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.till_id, Some(location.id.to_string()));

        let data = response.initial_data.unwrap();
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.roles.len(), 1);
        assert!(data.categories.is_empty());
        assert!(data.users[0].get("pin").is_none());
        assert!(data.users[0].get("password").is_none());
        assert_eq!(data.users[0]["name"], "Ana");

        let stored = registry.get_location(location.id).await.unwrap();
        assert!(stored.linked);
        assert!(stored.last_seen.is_some());
        assert_eq!(stored.device_info.unwrap()["os"], "android");

        let listed = registry.list_locations().await.unwrap();
        assert!(listed[0].online);
    }

    #[tokio::test]
    async fn test_link_unknown_code_does_not_mutate() {
        let (registry, _) = create_test_registry().await;
        let location = bar(&registry).await;
        let other = if location.link_code == "000000000000" {
            "111111111111"
        } else {
            "000000000000"
        };

        let response = registry.link(link_request(other)).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.code, Some(ErrorCode::InvalidLinkCode));
        assert!(response.error.is_some());

        let malformed = registry.link(link_request("12ab")).await.unwrap();
        assert!(!malformed.success);
        assert_eq!(malformed.code, Some(ErrorCode::InvalidLinkCode));

        let stored = registry.get_location(location.id).await.unwrap();
        assert!(!stored.linked);
        assert!(stored.last_seen.is_none());
    }

    #[tokio::test]
    async fn test_link_empty_code_is_bad_request() {
        let (registry, _) = create_test_registry().await;
        let err = registry.link(link_request("  ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let err = registry.link(LinkRequest::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_relink_is_idempotent_and_sees_new_data() {
        let (registry, store) = create_test_registry().await;
        let location = bar(&registry).await;
        let first = registry.link(link_request(&location.link_code)).await.unwrap();
        assert!(first.success);

        store
            .insert(collections::PRODUCTS, 5, json!({"id": 5, "name": "Tea"}))
            .await
            .unwrap();

        let second = registry.link(link_request(&location.link_code)).await.unwrap();
        assert!(second.success);
        assert_eq!(second.till_id, first.till_id);
        assert_eq!(second.initial_data.unwrap().products.len(), 2);
    }

    #[tokio::test]
    async fn test_heartbeat() {
        let (registry, _) = create_test_registry().await;
        let location = bar(&registry).await;
        let till_id = location.id.to_string();

        // Never linked
        let hb = registry
            .heartbeat(HeartbeatRequest {
                till_id: Some(till_id.clone()),
                device_info: None,
            })
            .await
            .unwrap();
        assert!(!hb.success);
        assert_eq!(hb.code, Some(ErrorCode::UnknownTerminal));

        registry.link(link_request(&location.link_code)).await.unwrap();
        let seen = registry.get_location(location.id).await.unwrap().last_seen;

        let hb = registry
            .heartbeat(HeartbeatRequest {
                till_id: Some(till_id),
                device_info: Some(json!({"battery": 80})),
            })
            .await
            .unwrap();
        assert!(hb.success);
        assert!(hb.code.is_none());

        let stored = registry.get_location(location.id).await.unwrap();
        assert!(stored.last_seen > seen);
        assert_eq!(stored.device_info.unwrap()["battery"], 80);
    }

    #[tokio::test]
    async fn test_heartbeat_unknown_and_malformed() {
        let (registry, _) = create_test_registry().await;
        let hb = registry
            .heartbeat(HeartbeatRequest {
                till_id: Some("999".into()),
                device_info: None,
            })
            .await
            .unwrap();
        assert!(!hb.success);
        assert_eq!(hb.code, Some(ErrorCode::UnknownTerminal));
        assert!(registry.list_locations().await.unwrap().is_empty());

        let err = registry
            .heartbeat(HeartbeatRequest {
                till_id: Some("abc".into()),
                device_info: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_next_seen_strictly_increases() {
        assert_eq!(next_seen(None, 100), 100);
        assert_eq!(next_seen(Some(50), 100), 100);
        assert_eq!(next_seen(Some(100), 100), 101);
        assert_eq!(next_seen(Some(200), 100), 201);
    }
}
