use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored document: a JSON object without its identifier
pub type Document = Map<String, Value>;

/// Named collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    JobSeekers,
    JobPostings,
    SkillSets,
    Applications,
    HiringManagers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::JobSeekers => "job_seekers",
            Collection::JobPostings => "job_postings",
            Collection::SkillSets => "skill_sets",
            Collection::Applications => "applications",
            Collection::HiringManagers => "hiring_managers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-generated record identifier, exchanged as a hyphenated UUID string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4())
    }

    /// Parse an identifier received at the API boundary
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw)
            .map(RecordId)
            .map_err(|e| StoreError::InvalidIdentifier(format!("'{}' is not a valid id: {}", raw, e)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        RecordId(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Selection of documents within one collection
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    FieldEquals { field: &'static str, value: Value },
}

impl Filter {
    pub fn field_equals(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::FieldEquals {
            field,
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::FieldEquals { field, value } => document.get(*field) == Some(value),
        }
    }
}

/// Errors raised at the store seam
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("record in {collection} is not a JSON object")]
    NotAnObject { collection: Collection },

    #[error("malformed record in {collection}: {source}")]
    Codec {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Document collection abstraction shared by all handlers
///
/// Implementations must return `find` results in a stable iteration order;
/// both shipped stores use insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, collection: Collection, document: Document) -> Result<RecordId, StoreError>;

    async fn find_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<(RecordId, Document)>, StoreError>;

    /// Overwrite every field of the record. Returns the number of records matched.
    async fn replace_by_id(&self, collection: Collection, id: RecordId, document: Document) -> Result<u64, StoreError>;

    async fn delete_by_id(&self, collection: Collection, id: RecordId) -> Result<u64, StoreError>;

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    /// Delete a parent record and every child whose `foreign_key` points at it,
    /// as one atomic operation. Children are removed even when the parent is
    /// already gone. Returns the number of parent records deleted.
    async fn delete_cascade(
        &self,
        parent: Collection,
        id: RecordId,
        child: Collection,
        foreign_key: &'static str,
    ) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self);
}
