use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::store::{DocumentBody, DocumentStore, StoredDocument};
use crate::types::{Collection, DocumentId};

/// In-process document store. Documents are kept in insertion order per collection.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        collection: Collection,
        body: DocumentBody,
    ) -> Result<StoredDocument, DatabaseError> {
        let doc = StoredDocument::new(DocumentId::generate(), body);
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(slot) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        *slot = StoredDocument::new(id, body);
        Ok(Some(slot.clone()))
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| d.id == id)
            .map(|index| docs.remove(index)))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
