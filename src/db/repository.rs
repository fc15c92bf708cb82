use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::record_store::{Collection, Document, Filter, RecordId, RecordStore, StoreError};

/// A typed record bound to its collection
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

/// A record together with its identifier, serialized with `_id` first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub record: T,
}

/// Typed operations over one collection of a [`RecordStore`]
pub struct Repository<T>(PhantomData<T>);

impl<T: Entity> Repository<T> {
    fn encode(record: &T) -> Result<Document, StoreError> {
        let value = serde_json::to_value(record).map_err(|source| StoreError::Codec {
            collection: T::COLLECTION,
            source,
        })?;
        match value {
            Value::Object(document) => Ok(document),
            _ => Err(StoreError::NotAnObject {
                collection: T::COLLECTION,
            }),
        }
    }

    fn decode(document: Document) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(document)).map_err(|source| StoreError::Codec {
            collection: T::COLLECTION,
            source,
        })
    }

    pub async fn insert(store: &dyn RecordStore, record: &T) -> Result<RecordId, StoreError> {
        let id = store.insert(T::COLLECTION, Self::encode(record)?).await?;
        debug!("Created record in {} with id={}", T::COLLECTION, id);
        Ok(id)
    }

    pub async fn find_by_id(store: &dyn RecordStore, id: RecordId) -> Result<Option<T>, StoreError> {
        store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn find_all(store: &dyn RecordStore) -> Result<Vec<Stored<T>>, StoreError> {
        Self::find_where(store, &Filter::All).await
    }

    pub async fn find_by_reference(
        store: &dyn RecordStore,
        field: &'static str,
        id: RecordId,
    ) -> Result<Vec<Stored<T>>, StoreError> {
        Self::find_where(store, &Filter::field_equals(field, id.to_string())).await
    }

    async fn find_where(store: &dyn RecordStore, filter: &Filter) -> Result<Vec<Stored<T>>, StoreError> {
        store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|(id, document)| Self::decode(document).map(|record| Stored { id, record }))
            .collect()
    }

    pub async fn replace_by_id(store: &dyn RecordStore, id: RecordId, record: &T) -> Result<u64, StoreError> {
        store
            .replace_by_id(T::COLLECTION, id, Self::encode(record)?)
            .await
    }

    pub async fn delete_by_id(store: &dyn RecordStore, id: RecordId) -> Result<u64, StoreError> {
        store.delete_by_id(T::COLLECTION, id).await
    }

    pub async fn delete_by_reference(
        store: &dyn RecordStore,
        field: &'static str,
        id: RecordId,
    ) -> Result<u64, StoreError> {
        store
            .delete_many(T::COLLECTION, &Filter::field_equals(field, id.to_string()))
            .await
    }
}
