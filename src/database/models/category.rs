use serde::{Deserialize, Serialize};

use super::Document;
use crate::types::{Collection, DocumentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: DocumentId,
    pub name: String,
    /// Display sort key
    pub order: i64,
}

/// Data required to insert a new [`Category`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub order: i64,
}

impl Category {
    pub fn from_new(id: DocumentId, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            order: new.order,
        }
    }
}

impl Document for Category {
    const COLLECTION: Collection = Collection::Categories;

    fn id(&self) -> DocumentId {
        self.id
    }
}
