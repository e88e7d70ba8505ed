use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::Document;
use crate::database::store::{DocumentBody, DocumentStore, StoredDocument};
use crate::types::DocumentId;

/// Typed CRUD over one collection of a [`DocumentStore`]
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        self.store
            .get_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn select_one(&self, id: DocumentId) -> Result<Option<T>, DatabaseError> {
        self.store
            .get_by_id(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn select_404(&self, id: DocumentId) -> Result<T, DatabaseError> {
        self.select_one(id).await?.ok_or(DatabaseError::NotFound {
            collection: T::COLLECTION,
            id,
        })
    }

    /// Store a new document; the store assigns its id
    pub async fn insert<D: Serialize>(&self, draft: &D) -> Result<T, DatabaseError> {
        let body = Self::encode(draft)?;
        let stored = self.store.create(T::COLLECTION, body).await?;
        Self::decode(stored)
    }

    /// Full replace keyed by the document's own id
    pub async fn replace_404(&self, doc: &T) -> Result<T, DatabaseError> {
        let id = doc.id();
        let body = Self::encode(doc)?;
        match self.store.replace(T::COLLECTION, id, body).await? {
            Some(stored) => Self::decode(stored),
            None => Err(DatabaseError::NotFound {
                collection: T::COLLECTION,
                id,
            }),
        }
    }

    pub async fn delete_404(&self, id: DocumentId) -> Result<T, DatabaseError> {
        match self.store.delete_by_id(T::COLLECTION, id).await? {
            Some(stored) => Self::decode(stored),
            None => Err(DatabaseError::NotFound {
                collection: T::COLLECTION,
                id,
            }),
        }
    }

    fn encode<D: Serialize>(doc: &D) -> Result<DocumentBody, DatabaseError> {
        match serde_json::to_value(doc) {
            Ok(Value::Object(body)) => Ok(body),
            Ok(other) => Err(DatabaseError::QueryError(format!(
                "{} documents must be JSON objects, got {}",
                T::COLLECTION,
                other
            ))),
            Err(source) => Err(DatabaseError::Decode {
                collection: T::COLLECTION,
                source,
            }),
        }
    }

    fn decode(stored: StoredDocument) -> Result<T, DatabaseError> {
        serde_json::from_value(stored.into_value()).map_err(|source| DatabaseError::Decode {
            collection: T::COLLECTION,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryDocumentStore;
    use crate::database::models::{Category, NewCategory};

    fn repository() -> Repository<Category> {
        Repository::new(Arc::new(MemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let repo = repository();
        let created = repo
            .insert(&NewCategory { name: "Drinks".into(), order: 1 })
            .await
            .unwrap();
        let loaded = repo.select_404(created.id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.order, 1);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let repo = repository();
        let id = DocumentId::generate();
        assert!(repo.select_one(id).await.unwrap().is_none());
        assert!(repo.select_404(id).await.unwrap_err().is_not_found());
        assert!(repo.delete_404(id).await.unwrap_err().is_not_found());

        let ghost = Category { id, name: "Ghost".into(), order: 0 };
        assert!(repo.replace_404(&ghost).await.unwrap_err().is_not_found());
    }
}
