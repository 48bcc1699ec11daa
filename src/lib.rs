pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AppConfig, StoreBackend};

/// Router for every resource, bound to `store`, behind the CORS layer
pub fn create_app<S: Store>(store: Arc<S>, cors_origins: &[String]) -> Router {
    api::routes::create_router::<S>()
        .with_state(store)
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Initialize the schema and serve the API on the configured address
pub async fn serve_store<S: Store>(store: S, config: &AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    store.migrate().await?;
    let app = create_app(Arc::new(store), &config.server.cors_origins);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Heroes API listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}

/// Serve with whichever store backend the configuration selects
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    match config.database.backend {
        StoreBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let database_url = config.database_url()?;
            let store = PostgresStore::new(&database_url, config.max_connections()).await?;
            serve_store(store, &config).await
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store, data is lost on shutdown");
            serve_store(MemoryStore::new(), &config).await
        }
    }
}
