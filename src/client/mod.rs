//! Client side of the catalog: an HTTP resource client plus the page
//! controllers that mirror server lists and drive the create/edit form.

pub mod form;
pub mod http;
pub mod page;
pub mod product_page;

pub use form::{CategoryForm, FormError, ProductForm};
pub use http::{Fetched, ResourceClient};
pub use page::{CategoryPage, Confirm, Editable, FormMode, Page, Submitted};
pub use product_page::{format_price, ProductPage, ProductRow};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{resource} list request returned {status}")]
    ListFailed {
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Form(#[from] FormError),
}
