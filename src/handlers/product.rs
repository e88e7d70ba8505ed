use axum::{
    extract::{Extension, Path},
    Json,
};
use tracing::info;

use crate::database::models::{CategoryRef, NewProduct, Product};
use crate::database::Catalog;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::parse_document_id;

/// GET /product - all products, category as a bare id
pub async fn list(Extension(catalog): Extension<Catalog>) -> ApiResult<Vec<Product>> {
    let products = catalog.products().await?;
    Ok(ApiResponse::success(products))
}

/// POST /product
pub async fn create(
    Extension(catalog): Extension<Catalog>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Product> {
    require_category(&payload.category)?;
    let product = catalog.create_product(payload).await?;
    info!("Created product {} ({})", product.id, product.code);
    Ok(ApiResponse::created(product))
}

/// PUT /product - full replace; the body carries the id
pub async fn replace(
    Extension(catalog): Extension<Catalog>,
    Json(payload): Json<Product>,
) -> ApiResult<Product> {
    require_category(&payload.category)?;
    let product = catalog.replace_product(payload).await?;
    info!("Replaced product {}", product.id);
    Ok(ApiResponse::success(product))
}

/// GET /product/:id - category expanded to the full document
pub async fn get(
    Path(id): Path<String>,
    Extension(catalog): Extension<Catalog>,
) -> ApiResult<Product> {
    let id = parse_document_id(&id)?;
    Ok(ApiResponse::success(catalog.product(id).await?))
}

/// DELETE /product/:id - returns the deleted document
pub async fn delete(
    Path(id): Path<String>,
    Extension(catalog): Extension<Catalog>,
) -> ApiResult<Product> {
    let id = parse_document_id(&id)?;
    let product = catalog.delete_product(id).await?;
    info!("Deleted product {} ({})", product.id, product.code);
    Ok(ApiResponse::success(product))
}

/// A `null` category only ever comes back from a read; writes must name one
fn require_category(category: &CategoryRef) -> Result<(), ApiError> {
    match category.id() {
        Some(_) => Ok(()),
        None => Err(ApiError::bad_request("category is required")),
    }
}
