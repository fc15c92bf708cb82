use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::record_store::Document;

/// Database representation of one document in the `records` table
#[derive(Debug, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub body: Json<Document>,
}
