//! Cart command inputs and change events.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::error::Operation;
use crate::product::Cart;

/// Request to set a product's amount.
///
/// `amount` is signed so out-of-range input from the UI reaches the store
/// and is rejected there instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }
}

/// Published after every committed mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartChanged {
    /// The operation that produced the new cart.
    pub operation: Operation,

    /// The cart as persisted.
    pub cart: Cart,

    pub committed_at: DateTime<Utc>,
}

impl CartChanged {
    pub fn new(operation: Operation, cart: Cart) -> Self {
        Self {
            operation,
            cart,
            committed_at: Utc::now(),
        }
    }
}
