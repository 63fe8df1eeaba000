//! Devtools API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};
use shared::util::snowflake_id;

use crate::core::ServerState;
use crate::db::collections;
use crate::db::repository::CatalogRepository;
use crate::utils::{AppError, AppResult};

/// Inserted document counts per collection
#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub categories: usize,
    pub products: usize,
    pub roles: usize,
    pub users: usize,
}

struct SeedCatalog {
    categories: Vec<Value>,
    products: Vec<Value>,
    roles: Vec<Value>,
    users: Vec<Value>,
}

fn sample_catalog() -> SeedCatalog {
    let drinks = snowflake_id();
    let food = snowflake_id();
    let admin = snowflake_id();
    let waiter = snowflake_id();

    let product = |category: i64, name: &str, price: f64| {
        json!({ "id": snowflake_id(), "name": name, "price": price, "categoryId": category })
    };

    SeedCatalog {
        categories: vec![
            json!({ "id": drinks, "name": "Drinks", "sortOrder": 1 }),
            json!({ "id": food, "name": "Food", "sortOrder": 2 }),
        ],
        products: vec![
            product(drinks, "Coffee", 2.5),
            product(drinks, "Tea", 2.0),
            product(drinks, "Orange juice", 3.0),
            product(food, "Cake", 4.0),
            product(food, "Sandwich", 5.5),
        ],
        roles: vec![
            json!({ "id": admin, "name": "admin", "permissions": ["all"] }),
            json!({ "id": waiter, "name": "waiter", "permissions": ["bookings", "sales"] }),
        ],
        users: vec![
            json!({ "id": snowflake_id(), "name": "Admin", "roleId": admin, "pin": "0000" }),
            json!({ "id": snowflake_id(), "name": "Waiter", "roleId": waiter, "pin": "1111" }),
        ],
    }
}

/// POST /api/devtools/seed - 写入示例目录数据 (仅开发环境)
pub async fn seed(State(state): State<ServerState>) -> AppResult<Json<SeedResult>> {
    if !state.config.is_development() {
        return Err(AppError::not_found("route"));
    }

    let repo = CatalogRepository::new(state.store.clone());
    let catalog = sample_catalog();
    let result = SeedResult {
        categories: repo.seed(collections::CATEGORIES, catalog.categories).await?,
        products: repo.seed(collections::PRODUCTS, catalog.products).await?,
        roles: repo.seed(collections::ROLES, catalog.roles).await?,
        users: repo.seed(collections::USERS, catalog.users).await?,
    };

    tracing::info!(
        categories = result.categories,
        products = result.products,
        roles = result.roles,
        users = result.users,
        "Development catalog seeded"
    );
    Ok(Json(result))
}
