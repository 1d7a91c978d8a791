//! In-memory catalog implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use common::ProductId;

use crate::error::{CatalogError, Result};
use crate::records::{CatalogProduct, CatalogSeed, Stock};
use crate::service::CatalogService;

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, CatalogProduct>,
    stock: HashMap<ProductId, u32>,
    latency: Option<Duration>,
    fail_requests: bool,
    requests: usize,
}

/// In-memory catalog for tests and offline demos.
///
/// Clones share state, so a test can change stock levels while a store
/// holds another handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a json-server style seed.
    pub fn from_seed(seed: CatalogSeed) -> Self {
        let catalog = Self::new();
        {
            let mut state = catalog.write();
            for product in seed.products {
                state.products.insert(product.id, product);
            }
            for stock in seed.stock {
                state.stock.insert(stock.id, stock.amount);
            }
        }
        catalog
    }

    /// Registers a product together with its stock level.
    pub fn insert(&self, product: CatalogProduct, stock: u32) {
        let mut state = self.write();
        state.stock.insert(product.id, stock);
        state.products.insert(product.id, product);
    }

    /// Changes the stock level of a product.
    pub fn set_stock(&self, id: impl Into<ProductId>, amount: u32) {
        self.write().stock.insert(id.into(), amount);
    }

    /// Delays every lookup by `latency` to simulate a slow network.
    pub fn set_latency(&self, latency: Duration) {
        self.write().latency = Some(latency);
    }

    /// Configures every subsequent lookup to fail as if the catalog were down.
    pub fn set_fail_requests(&self, fail: bool) {
        self.write().fail_requests = fail;
    }

    /// Returns the number of lookups served or refused so far.
    pub fn request_count(&self) -> usize {
        self.read().requests
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryCatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryCatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts the request and returns the configured latency, or an error
    /// when the catalog is set to fail.
    fn begin_request(&self) -> Result<Option<Duration>> {
        let mut state = self.write();
        state.requests += 1;
        if state.fail_requests {
            return Err(CatalogError::Unavailable("connection refused".to_string()));
        }
        Ok(state.latency)
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct> {
        if let Some(latency) = self.begin_request()? {
            tokio::time::sleep(latency).await;
        }

        self.read()
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                resource: "products",
                id,
            })
    }

    async fn stock(&self, id: ProductId) -> Result<Stock> {
        if let Some(latency) = self.begin_request()? {
            tokio::time::sleep(latency).await;
        }

        self.read()
            .stock
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or(CatalogError::NotFound {
                resource: "stock",
                id,
            })
    }
}
