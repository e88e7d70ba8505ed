use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::manager::DatabaseError;
use crate::types::{Collection, DocumentId};

/// Document body without its identifier
pub type DocumentBody = Map<String, Value>;

/// A document as held by the store: id plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: DocumentBody,
}

impl StoredDocument {
    pub fn new(id: DocumentId, mut body: DocumentBody) -> Self {
        body.remove("id");
        body.remove("_id");
        Self { id, body }
    }

    /// Wire shape: the body with `id` merged in
    pub fn into_value(self) -> Value {
        let mut map = self.body;
        map.insert("id".into(), Value::String(self.id.to_string()));
        Value::Object(map)
    }
}

/// Raw document persistence for the catalog collections.
///
/// Absence is reported as `Ok(None)`; callers decide whether that is a 404.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError>;

    /// All documents of a collection in insertion order
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError>;

    /// Insert a new document under a freshly generated id
    async fn create(
        &self,
        collection: Collection,
        body: DocumentBody,
    ) -> Result<StoredDocument, DatabaseError>;

    /// Full replace of the body; returns the new state
    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DatabaseError>;

    /// Remove a document; returns what was deleted
    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_document_drops_inline_ids() {
        let body = json!({ "id": "x", "_id": "y", "name": "Drinks" });
        let id = DocumentId::generate();
        let doc = StoredDocument::new(id, body.as_object().unwrap().clone());
        assert_eq!(doc.body.len(), 1);

        let value = doc.into_value();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["name"], json!("Drinks"));
    }
}
