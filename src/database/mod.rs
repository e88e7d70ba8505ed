pub mod catalog;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

pub use catalog::Catalog;
pub use manager::{DatabaseError, DatabaseManager};
pub use store::{DocumentStore, StoredDocument};
