//! SurrealDB-backed document store
//!
//! Each document is stored as `{ body: <json> }` under record id
//! `<collection>:<id>`. Reads select `VALUE body`, so record ids never
//! cross the serde boundary.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

use super::store::{
    Document, DocumentStore, FieldGuard, StoreError, StoreResult, UpdateOutcome, document_id,
};

/// Namespace and database used for every connection
pub const NAMESPACE: &str = "hospos";
pub const DATABASE: &str = "hospos";

#[derive(Debug, Deserialize)]
struct BodyRow {
    body: Value,
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Store backed by a single shared SurrealDB connection
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
    timeout: Duration,
    bulk_timeout: Duration,
}

impl SurrealStore {
    /// Connect once and select the namespace/database
    ///
    /// `uri` is any SurrealDB endpoint, e.g. `rocksdb://data/hospos.db` or `ws://db:8000`.
    pub async fn connect(uri: &str, timeout: Duration, bulk_timeout: Duration) -> StoreResult<Self> {
        let db = tokio::time::timeout(bulk_timeout, async {
            let db = any::connect(uri).await?;
            db.use_ns(NAMESPACE).use_db(DATABASE).await?;
            Ok::<_, surrealdb::Error>(db)
        })
        .await
        .map_err(|_| StoreError::Timeout(bulk_timeout))??;

        tracing::info!(uri = %uri, "Document store connected (SurrealDB)");

        Ok(Self {
            db,
            timeout,
            bulk_timeout,
        })
    }

    async fn timed<T, F>(&self, budget: Duration, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        tokio::time::timeout(budget, fut)
            .await
            .map_err(|_| StoreError::Timeout(budget))?
    }

    async fn select_one(&self, collection: &str, id: i64) -> StoreResult<Option<Document>> {
        let mut response = self
            .db
            .query("SELECT VALUE body FROM type::thing($tb, $id)")
            .bind(("tb", collection.to_string()))
            .bind(("id", id))
            .await?;
        let docs: Vec<Value> = response.take(0)?;
        Ok(docs.into_iter().next())
    }

    async fn create(&self, collection: &str, id: i64, doc: Document) -> StoreResult<()> {
        let result = self
            .db
            .query("CREATE type::thing($tb, $id) CONTENT { body: $body } RETURN NONE")
            .bind(("tb", collection.to_string()))
            .bind(("id", id))
            .bind(("body", doc))
            .await?
            .check();
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("already exists") => Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Field names are interpolated into queries; only plain identifiers pass
fn checked_field(field: &str) -> StoreResult<&str> {
    let mut chars = field.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(field)
    } else {
        Err(StoreError::InvalidQuery(format!("invalid field name '{}'", field)))
    }
}

/// Per-field `SET` assignments for a shallow patch
///
/// `null` removes the field; `id` is never written.
fn assignments(patch: &Document) -> StoreResult<(Vec<String>, Vec<(String, Value)>)> {
    let fields = patch
        .as_object()
        .ok_or_else(|| StoreError::Malformed("patch is not an object".into()))?;
    let mut sets = Vec::with_capacity(fields.len());
    let mut params = Vec::new();
    for (key, value) in fields {
        if key == "id" {
            continue;
        }
        let field = checked_field(key)?;
        if value.is_null() {
            sets.push(format!("body.`{field}` = NONE"));
        } else {
            let name = format!("p{}", params.len());
            sets.push(format!("body.`{field}` = ${name}"));
            params.push((name, value.clone()));
        }
    }
    Ok((sets, params))
}

fn sort_by_id(docs: &mut [Document]) {
    docs.sort_by_key(|doc| document_id(doc).unwrap_or(i64::MAX));
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn insert(&self, collection: &str, id: i64, doc: Document) -> StoreResult<()> {
        self.timed(self.timeout, self.create(collection, id, doc)).await
    }

    async fn insert_many(
        &self,
        collection: &str,
        docs: Vec<(i64, Document)>,
    ) -> StoreResult<usize> {
        self.timed(self.bulk_timeout, async {
            let count = docs.len();
            for (id, doc) in docs {
                self.create(collection, id, doc).await?;
            }
            Ok(count)
        })
        .await
    }

    async fn get(&self, collection: &str, id: i64) -> StoreResult<Option<Document>> {
        self.timed(self.timeout, self.select_one(collection, id)).await
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.timed(self.timeout, async {
            let mut response = self
                .db
                .query("SELECT VALUE body FROM type::table($tb)")
                .bind(("tb", collection.to_string()))
                .await?;
            let mut docs: Vec<Value> = response.take(0)?;
            sort_by_id(&mut docs);
            Ok(docs)
        })
        .await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &'static str,
        value: Value,
    ) -> StoreResult<Vec<Document>> {
        let field = checked_field(field)?;
        let sql = format!("SELECT VALUE body FROM type::table($tb) WHERE body.{field} = $value");
        self.timed(self.timeout, async {
            let mut response = self
                .db
                .query(sql)
                .bind(("tb", collection.to_string()))
                .bind(("value", value))
                .await?;
            let mut docs: Vec<Value> = response.take(0)?;
            sort_by_id(&mut docs);
            Ok(docs)
        })
        .await
    }

    async fn update(
        &self,
        collection: &str,
        id: i64,
        guard: Option<FieldGuard>,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        self.timed(self.timeout, async {
            let Some(current) = self.select_one(collection, id).await? else {
                return Ok(UpdateOutcome::Missing);
            };
            if let Some(guard) = &guard
                && !guard.matches(&current)
            {
                return Ok(UpdateOutcome::Rejected(current));
            }
            let (sets, params) = assignments(&patch)?;
            if sets.is_empty() {
                return Ok(UpdateOutcome::Updated(current));
            }
            let set = sets.join(", ");

            // 只写入补丁中的字段；守卫条件在同一条 UPDATE 内复查
            let mut query = match &guard {
                Some(guard) => {
                    let field = checked_field(guard.field)?;
                    self.db
                        .query(format!(
                            "UPDATE type::thing($tb, $id) SET {set} \
                             WHERE body.{field} = $expected RETURN body"
                        ))
                        .bind(("expected", guard.equals.clone()))
                }
                None => self
                    .db
                    .query(format!("UPDATE type::thing($tb, $id) SET {set} RETURN body")),
            };
            query = query.bind(("tb", collection.to_string())).bind(("id", id));
            for param in params {
                query = query.bind(param);
            }
            let mut response = query.await?;
            let rows: Vec<BodyRow> = response.take(0)?;

            match rows.into_iter().next() {
                Some(row) => Ok(UpdateOutcome::Updated(row.body)),
                None => Ok(match self.select_one(collection, id).await? {
                    Some(current) => UpdateOutcome::Rejected(current),
                    None => UpdateOutcome::Missing,
                }),
            }
        })
        .await
    }

    async fn delete(&self, collection: &str, id: i64) -> StoreResult<bool> {
        self.timed(self.timeout, async {
            if self.select_one(collection, id).await?.is_none() {
                return Ok(false);
            }
            self.db
                .query("DELETE type::thing($tb, $id)")
                .bind(("tb", collection.to_string()))
                .bind(("id", id))
                .await?
                .check()?;
            Ok(true)
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.timed(self.timeout, async {
            self.db.query("RETURN true").await?.check()?;
            Ok(())
        })
        .await
    }
}
