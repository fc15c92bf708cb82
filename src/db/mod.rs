pub mod connection;
pub mod memory_store;
pub mod migrations;
pub mod models;
pub mod pg_store;
pub mod record_store;
pub mod repository;

pub use memory_store::InMemoryRecordStore;
pub use pg_store::PgRecordStore;
pub use record_store::{Collection, RecordId, RecordStore, StoreError};
pub use repository::{Entity, Repository, Stored};
