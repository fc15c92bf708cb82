use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};

use super::connection::get_connection;
use super::migrations::run_migrations;
use super::models::DocumentRow;
use super::record_store::{Collection, Document, Filter, RecordId, RecordStore, StoreError};

/// PostgreSQL-backed document store; each record is a JSONB row tagged with its collection
pub struct PgRecordStore {
    pool: Pool<Postgres>,
}

impl PgRecordStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = get_connection(database_url, max_connections).await?;
        info!("Database connection pool established");
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        run_migrations(&self.pool).await?;
        Ok(())
    }
}

/// JSONB containment document for a field-equality filter
fn containment(field: &str, value: &Value) -> Value {
    json!({ field: value })
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();
        sqlx::query("INSERT INTO records (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(collection.as_str())
            .bind(Json(&document))
            .execute(&self.pool)
            .await?;

        debug!("Inserted {} into {}", id, collection);
        Ok(id)
    }

    async fn find_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM records WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.body.0))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<(RecordId, Document)>, StoreError> {
        let rows = match filter {
            Filter::All => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT id, body FROM records WHERE collection = $1 ORDER BY seq",
                )
                .bind(collection.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            Filter::FieldEquals { field, value } => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT id, body FROM records WHERE collection = $1 AND body @> $2 ORDER BY seq",
                )
                .bind(collection.as_str())
                .bind(Json(containment(field, value)))
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!("Found {} records in {}", rows.len(), collection);
        Ok(rows
            .into_iter()
            .map(|row| (RecordId::from(row.id), row.body.0))
            .collect())
    }

    async fn replace_by_id(&self, collection: Collection, id: RecordId, document: Document) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE records SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id.as_uuid())
            .bind(Json(&document))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, collection: Collection, id: RecordId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let result = match filter {
            Filter::All => {
                sqlx::query("DELETE FROM records WHERE collection = $1")
                    .bind(collection.as_str())
                    .execute(&self.pool)
                    .await?
            }
            Filter::FieldEquals { field, value } => {
                sqlx::query("DELETE FROM records WHERE collection = $1 AND body @> $2")
                    .bind(collection.as_str())
                    .bind(Json(containment(field, value)))
                    .execute(&self.pool)
                    .await?
            }
        };

        debug!("Deleted {} records from {}", result.rows_affected(), collection);
        Ok(result.rows_affected())
    }

    async fn delete_cascade(
        &self,
        parent: Collection,
        id: RecordId,
        child: Collection,
        foreign_key: &'static str,
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(parent.as_str())
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let children = sqlx::query("DELETE FROM records WHERE collection = $1 AND body @> $2")
            .bind(child.as_str())
            .bind(Json(containment(foreign_key, &Value::String(id.to_string()))))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!("Cascade delete of {} removed {} rows from {}", id, children, child);
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connections closed");
    }
}
