use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use super::record_store::{Collection, Document, Filter, RecordId, RecordStore, StoreError};

type Collections = HashMap<Collection, Vec<(RecordId, Document)>>;

/// Process-local store keeping each collection in insertion order
#[derive(Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<Collections>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

fn remove_matching(collections: &mut Collections, collection: Collection, filter: &Filter) -> u64 {
    let Some(records) = collections.get_mut(&collection) else {
        return 0;
    };
    let before = records.len();
    records.retain(|(_, document)| !filter.matches(document));
    (before - records.len()) as u64
}

fn remove_by_id(collections: &mut Collections, collection: Collection, id: RecordId) -> u64 {
    let Some(records) = collections.get_mut(&collection) else {
        return 0;
    };
    match records.iter().position(|(record_id, _)| *record_id == id) {
        Some(index) => {
            records.remove(index);
            1
        }
        None => 0,
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();
        self.write()?.entry(collection).or_default().push((id, document));
        debug!("Inserted {} into {}", id, collection);
        Ok(id)
    }

    async fn find_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections.get(&collection).and_then(|records| {
            records
                .iter()
                .find(|(record_id, _)| *record_id == id)
                .map(|(_, document)| document.clone())
        }))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<(RecordId, Document)>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, document)| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace_by_id(&self, collection: Collection, id: RecordId, document: Document) -> Result<u64, StoreError> {
        let mut collections = self.write()?;
        let slot = collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|(record_id, _)| *record_id == id));
        match slot {
            Some((_, existing)) => {
                *existing = document;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, collection: Collection, id: RecordId) -> Result<u64, StoreError> {
        Ok(remove_by_id(&mut *self.write()?, collection, id))
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        Ok(remove_matching(&mut *self.write()?, collection, filter))
    }

    async fn delete_cascade(
        &self,
        parent: Collection,
        id: RecordId,
        child: Collection,
        foreign_key: &'static str,
    ) -> Result<u64, StoreError> {
        // One write guard covers both removals.
        let mut collections = self.write()?;
        let deleted = remove_by_id(&mut collections, parent, id);
        let children = remove_matching(
            &mut collections,
            child,
            &Filter::field_equals(foreign_key, id.to_string()),
        );
        debug!("Cascade delete of {} removed {} rows from {}", id, children, child);
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn close(&self) {}
}
