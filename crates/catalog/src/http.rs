//! Catalog client for a json-server style REST API.

use async_trait::async_trait;
use common::ProductId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, Result};
use crate::records::{CatalogProduct, Stock};
use crate::service::CatalogService;

/// Catalog backed by `GET {base}/products/{id}` and `GET {base}/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for the catalog rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns the catalog root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch<T: DeserializeOwned>(&self, resource: &'static str, id: ProductId) -> Result<T> {
        metrics::counter!("catalog_requests_total", "resource" => resource).increment(1);

        let response = self.client.get(self.url(resource, id)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(CatalogError::Unavailable(format!(
                "{resource}/{id} answered {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(format!("{resource}/{id}: {e}")))
    }
}

fn ensure_id(resource: &str, requested: ProductId, returned: ProductId) -> Result<()> {
    if requested != returned {
        return Err(CatalogError::InvalidResponse(format!(
            "{resource}/{requested} returned record for {returned}"
        )));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct> {
        let product: CatalogProduct = self.fetch("products", id).await?;
        ensure_id("products", id, product.id)?;
        Ok(product)
    }

    async fn stock(&self, id: ProductId) -> Result<Stock> {
        let stock: Stock = self.fetch("stock", id).await?;
        ensure_id("stock", id, stock.id)?;
        Ok(stock)
    }
}
