// handlers/mod.rs - Resource handlers
//
// One module per document collection. Collection-level routes
// (`/category`, `/product`) list, create and replace; record-level routes
// (`/category/:id`, `/product/:id`) show and delete.

pub mod category;
pub mod product;
pub mod utils;
