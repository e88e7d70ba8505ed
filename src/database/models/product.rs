use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, Document};
use crate::types::{Collection, DocumentId};

/// A product's link to its category.
///
/// Stored and listed as a bare id; single-record reads expand it. The link is
/// not validated, so it may point at a category that no longer exists, in
/// which case a single read answers `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(DocumentId),
    Expanded(Category),
    /// Any other object carrying the category id; only accepted on input
    Stub {
        #[serde(alias = "_id")]
        id: DocumentId,
    },
    /// Expansion found no category
    Missing,
}

impl CategoryRef {
    pub fn id(&self) -> Option<DocumentId> {
        match self {
            CategoryRef::Id(id) | CategoryRef::Stub { id } => Some(*id),
            CategoryRef::Expanded(category) => Some(category.id),
            CategoryRef::Missing => None,
        }
    }

    /// Collapse to the bare-id form used for storage
    pub fn flatten(self) -> Self {
        match self.id() {
            Some(id) => CategoryRef::Id(id),
            None => CategoryRef::Missing,
        }
    }

    pub fn expanded(&self) -> Option<&Category> {
        match self {
            CategoryRef::Expanded(category) => Some(category),
            _ => None,
        }
    }
}

impl From<DocumentId> for CategoryRef {
    fn from(id: DocumentId) -> Self {
        CategoryRef::Id(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: DocumentId,
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: CategoryRef,
}

/// Data required to insert a new [`Product`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: CategoryRef,
}

impl Product {
    pub fn from_new(id: DocumentId, new: NewProduct) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
        }
    }
}

impl Document for Product {
    const COLLECTION: Collection = Collection::Products;

    fn id(&self) -> DocumentId {
        self.id
    }
}
