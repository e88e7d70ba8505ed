use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Catalog;
use crate::handlers;

/// Full application router over the given catalog
pub fn app(catalog: Catalog, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(category_routes())
        .merge(product_routes())
        .layer(Extension(catalog))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn category_routes() -> Router {
    use handlers::category;

    Router::new()
        // Collection-level operations
        .route(
            "/category",
            get(category::list)
                .post(category::create)
                .put(category::replace),
        )
        // Record-level operations
        .route("/category/:id", get(category::get).delete(category::delete))
}

fn product_routes() -> Router {
    use handlers::product;

    Router::new()
        .route(
            "/product",
            get(product::list)
                .post(product::create)
                .put(product::replace),
        )
        .route("/product/:id", get(product::get).delete(product::delete))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Catalog Admin API",
        "version": version,
        "description": "Category and product CRUD over a document store",
        "endpoints": {
            "category": "/category[/:id]",
            "product": "/product[/:id] (single reads expand category)",
            "health": "/health",
        }
    }))
}

async fn health(Extension(catalog): Extension<Catalog>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match catalog.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
