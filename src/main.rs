use catalog_admin::config::{self, StoreBackend};
use catalog_admin::{app, is_production, Catalog};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, STORE_BACKEND, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Catalog Admin API in {:?} mode", config.environment);

    if config.database.backend == StoreBackend::Memory {
        if is_production!() {
            tracing::warn!("Running production with the in-memory store; data will not survive a restart");
        } else {
            tracing::info!("Using in-memory document store");
        }
    }

    let catalog = Catalog::for_backend(config.database.backend);
    let app = app(catalog, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Catalog Admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
