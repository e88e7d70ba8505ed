use std::sync::Arc;
use tracing::warn;

use crate::database::manager::DatabaseError;
use crate::database::memory::MemoryDocumentStore;
use crate::database::models::{Category, CategoryRef, NewCategory, NewProduct, Product};
use crate::database::postgres::PgDocumentStore;
use crate::database::repository::Repository;
use crate::database::store::DocumentStore;
use crate::config::StoreBackend;
use crate::types::DocumentId;

/// Catalog access used by the HTTP handlers.
///
/// Product reads by id resolve the category reference; every other read
/// returns it as stored. Writes always store the bare id.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
    categories: Repository<Category>,
    products: Repository<Product>,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            categories: Repository::new(Arc::clone(&store)),
            products: Repository::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    pub fn for_backend(backend: StoreBackend) -> Self {
        match backend {
            StoreBackend::Postgres => Self::new(Arc::new(PgDocumentStore::new())),
            StoreBackend::Memory => Self::in_memory(),
        }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }

    // Categories

    pub async fn categories(&self) -> Result<Vec<Category>, DatabaseError> {
        self.categories.select_all().await
    }

    pub async fn category(&self, id: DocumentId) -> Result<Category, DatabaseError> {
        self.categories.select_404(id).await
    }

    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, DatabaseError> {
        self.categories.insert(new).await
    }

    pub async fn replace_category(&self, category: &Category) -> Result<Category, DatabaseError> {
        self.categories.replace_404(category).await
    }

    /// Products pointing at the category keep their (now dangling) reference
    pub async fn delete_category(&self, id: DocumentId) -> Result<Category, DatabaseError> {
        self.categories.delete_404(id).await
    }

    // Products

    pub async fn products(&self) -> Result<Vec<Product>, DatabaseError> {
        self.products.select_all().await
    }

    /// Single product with its category expanded, or `Missing` when the
    /// referenced category no longer exists
    pub async fn product(&self, id: DocumentId) -> Result<Product, DatabaseError> {
        let mut product = self.products.select_404(id).await?;
        let Some(category_id) = product.category.id() else {
            return Ok(product);
        };
        product.category = match self.categories.select_one(category_id).await? {
            Some(category) => CategoryRef::Expanded(category),
            None => {
                warn!("product {} references missing category {}", id, category_id);
                CategoryRef::Missing
            }
        };
        Ok(product)
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product, DatabaseError> {
        let new = NewProduct {
            category: new.category.flatten(),
            ..new
        };
        self.products.insert(&new).await
    }

    pub async fn replace_product(&self, product: Product) -> Result<Product, DatabaseError> {
        let product = Product {
            category: product.category.flatten(),
            ..product
        };
        self.products.replace_404(&product).await
    }

    pub async fn delete_product(&self, id: DocumentId) -> Result<Product, DatabaseError> {
        self.products.delete_404(id).await
    }
}
