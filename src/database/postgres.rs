use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::store::{DocumentBody, DocumentStore, StoredDocument};
use crate::types::{Collection, DocumentId};

/// JSONB-backed document store. Every operation goes through the shared
/// pool from `DatabaseManager`, which connects on first use.
#[derive(Debug, Default, Clone)]
pub struct PgDocumentStore;

impl PgDocumentStore {
    pub fn new() -> Self {
        Self
    }

    async fn pool(&self) -> Result<PgPool, DatabaseError> {
        DatabaseManager::pool().await
    }

    fn log_query(sql: &str) {
        if crate::config::config().database.enable_query_logging {
            debug!(target: "catalog_admin::sql", "{}", sql);
        }
    }

    fn row_to_document(collection: Collection, row: PgRow) -> Result<StoredDocument, DatabaseError> {
        let id: Uuid = row.try_get("id")?;
        let doc: Value = row.try_get("doc")?;
        match doc {
            Value::Object(body) => Ok(StoredDocument::new(id.into(), body)),
            other => Err(DatabaseError::QueryError(format!(
                "{} document {} is not an object: {}",
                collection, id, other
            ))),
        }
    }

    fn rows_to_documents(
        collection: Collection,
        rows: Option<PgRow>,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        rows.map(|row| Self::row_to_document(collection, row)).transpose()
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!("SELECT id, doc FROM \"{}\" WHERE id = $1", collection.table_name());
        Self::log_query(&sql);

        let pool = self.pool().await?;
        let row = sqlx::query(&sql).bind(id.as_uuid()).fetch_optional(&pool).await?;
        Self::rows_to_documents(collection, row)
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError> {
        let sql = format!("SELECT id, doc FROM \"{}\" ORDER BY seq", collection.table_name());
        Self::log_query(&sql);

        let pool = self.pool().await?;
        sqlx::query(&sql)
            .fetch_all(&pool)
            .await?
            .into_iter()
            .map(|row| Self::row_to_document(collection, row))
            .collect()
    }

    async fn create(
        &self,
        collection: Collection,
        body: DocumentBody,
    ) -> Result<StoredDocument, DatabaseError> {
        let doc = StoredDocument::new(DocumentId::generate(), body);
        let sql = format!(
            "INSERT INTO \"{}\" (id, doc) VALUES ($1, $2) RETURNING id, doc",
            collection.table_name()
        );
        Self::log_query(&sql);

        let pool = self.pool().await?;
        let row = sqlx::query(&sql)
            .bind(doc.id.as_uuid())
            .bind(Json(&doc.body))
            .fetch_one(&pool)
            .await?;
        Self::row_to_document(collection, row)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: DocumentId,
        body: DocumentBody,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let doc = StoredDocument::new(id, body);
        let sql = format!(
            "UPDATE \"{}\" SET doc = $2 WHERE id = $1 RETURNING id, doc",
            collection.table_name()
        );
        Self::log_query(&sql);

        let pool = self.pool().await?;
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Json(&doc.body))
            .fetch_optional(&pool)
            .await?;
        Self::rows_to_documents(collection, row)
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE id = $1 RETURNING id, doc",
            collection.table_name()
        );
        Self::log_query(&sql);

        let pool = self.pool().await?;
        let row = sqlx::query(&sql).bind(id.as_uuid()).fetch_optional(&pool).await?;
        Self::rows_to_documents(collection, row)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check().await
    }
}
