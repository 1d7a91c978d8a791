//! Local HTTP host for the RocketShoes cart.
//!
//! Serves the cart to a storefront UI over REST, streams notifications as
//! server-sent events, and exposes Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use cart::{BroadcastNotifier, CartConfig, CartQueue, CartStore};
use catalog::{CatalogSeed, CatalogService, HttpCatalog, InMemoryCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use storage::KeyValueStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::StartupError;

/// Buffered notifications per SSE subscriber.
const NOTIFICATION_CAPACITY: usize = 32;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub cart: CartQueue,
    pub notifications: BroadcastNotifier,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/cart", get(routes::cart::get))
        .route(
            "/cart/items/{id}",
            post(routes::cart::add)
                .delete(routes::cart::remove)
                .put(routes::cart::update_amount),
        )
        .route("/notifications", get(routes::notifications::stream))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Opens the cart over `storage` and `catalog` and starts its command queue.
///
/// Must be called from within a tokio runtime.
pub async fn create_state<S, C>(
    storage: S,
    catalog: C,
    config: CartConfig,
) -> Result<Arc<AppState>, StartupError>
where
    S: KeyValueStore + 'static,
    C: CatalogService + 'static,
{
    let notifications = BroadcastNotifier::new(NOTIFICATION_CAPACITY);
    let store = CartStore::open(storage, catalog, notifications.clone(), config).await?;

    Ok(Arc::new(AppState {
        cart: CartQueue::spawn(store),
        notifications,
    }))
}

/// Builds the catalog selected by `config`.
///
/// A configured seed file is loaded into memory; otherwise requests go to
/// the catalog API at `config.catalog_url`.
pub async fn create_catalog(config: &Config) -> Result<Arc<dyn CatalogService>, StartupError> {
    match &config.catalog_seed {
        Some(path) => {
            let seed = load_seed(path).await?;
            tracing::info!(
                path = %path.display(),
                products = seed.products.len(),
                "serving catalog from seed file"
            );
            Ok(Arc::new(InMemoryCatalog::from_seed(seed)))
        }
        None => {
            tracing::info!(url = %config.catalog_url, "using catalog API");
            Ok(Arc::new(HttpCatalog::new(config.catalog_url.clone())))
        }
    }
}

async fn load_seed(path: &Path) -> Result<CatalogSeed, StartupError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| StartupError::SeedFormat {
        path: path.to_path_buf(),
        source,
    })
}
