//! Records returned by the catalog.

use common::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product metadata as served by the catalog.
///
/// Only the id is interpreted. Everything else (title, price, image, ...)
/// is carried through untouched for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CatalogProduct {
    /// Creates a record with no metadata.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            details: Map::new(),
        }
    }

    /// Adds a metadata field.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Units of a product currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

/// Catalog contents in the json-server `db.json` layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}
