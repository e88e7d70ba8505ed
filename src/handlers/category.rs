use axum::{
    extract::{Extension, Path},
    Json,
};
use tracing::info;

use crate::database::models::{Category, NewCategory};
use crate::database::Catalog;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::parse_document_id;

/// GET /category - all categories
pub async fn list(Extension(catalog): Extension<Catalog>) -> ApiResult<Vec<Category>> {
    let categories = catalog.categories().await?;
    Ok(ApiResponse::success(categories))
}

/// POST /category - create from `{name, order}`
pub async fn create(
    Extension(catalog): Extension<Catalog>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<Category> {
    let category = catalog.create_category(&payload).await?;
    info!("Created category {} ({})", category.id, category.name);
    Ok(ApiResponse::created(category))
}

/// PUT /category - full replace; the body carries the id
pub async fn replace(
    Extension(catalog): Extension<Catalog>,
    Json(payload): Json<Category>,
) -> ApiResult<Category> {
    let category = catalog.replace_category(&payload).await?;
    info!("Replaced category {}", category.id);
    Ok(ApiResponse::success(category))
}

/// GET /category/:id
pub async fn get(
    Path(id): Path<String>,
    Extension(catalog): Extension<Catalog>,
) -> ApiResult<Category> {
    let id = parse_document_id(&id)?;
    Ok(ApiResponse::success(catalog.category(id).await?))
}

/// DELETE /category/:id - returns the deleted document
pub async fn delete(
    Path(id): Path<String>,
    Extension(catalog): Extension<Catalog>,
) -> ApiResult<Category> {
    let id = parse_document_id(&id)?;
    let category = catalog.delete_category(id).await?;
    info!("Deleted category {} ({})", category.id, category.name);
    Ok(ApiResponse::success(category))
}
