pub mod category;
pub mod product;

pub use category::{Category, NewCategory};
pub use product::{CategoryRef, NewProduct, Product};

use serde::{de::DeserializeOwned, Serialize};

use crate::types::{Collection, DocumentId};

/// A typed document living in one collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> DocumentId;
}
