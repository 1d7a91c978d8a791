//! Catalog service trait.

use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;

use crate::error::Result;
use crate::records::{CatalogProduct, Stock};

/// Point lookups against the remote catalog.
///
/// Both calls fail with [`CatalogError::NotFound`](crate::CatalogError::NotFound)
/// for an unknown id and with a transport error when the catalog is
/// unreachable.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches product metadata.
    async fn product(&self, id: ProductId) -> Result<CatalogProduct>;

    /// Fetches the current stock level.
    async fn stock(&self, id: ProductId) -> Result<Stock>;
}

#[async_trait]
impl<T: CatalogService + ?Sized> CatalogService for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock> {
        (**self).stock(id).await
    }
}
