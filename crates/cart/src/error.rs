//! Cart error types.

use catalog::CatalogError;
use common::ProductId;
use storage::StorageError;
use thiserror::Error;

use crate::notification::NotificationKind;

/// The three mutations a cart accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::UpdateAmount => "update_amount",
        }
    }

    /// The generic failure kind reported for this operation.
    pub fn failure_kind(&self) -> NotificationKind {
        match self {
            Operation::Add => NotificationKind::AddFailed,
            Operation::Remove => NotificationKind::RemoveFailed,
            Operation::UpdateAmount => NotificationKind::UpdateFailed,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a cart operation is rejected.
///
/// These never leave the store: each one is turned into a single
/// [`Notification`](crate::Notification). Only [`CartStore::open`](crate::CartStore::open)
/// returns one to the caller.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product or stock lookup failed.
    #[error("Catalog lookup failed: {0}")]
    FetchFailure(#[from] CatalogError),

    /// The requested amount exceeds what is in stock.
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// The requested amount is below 1.
    #[error("Invalid quantity: {requested} (must be at least 1)")]
    InvalidQuantity { requested: i64 },

    /// Removal found no matching entry.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Reading or writing the snapshot failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Maps the error to the notification shown for `operation`.
    pub fn notification_kind(&self, operation: Operation) -> NotificationKind {
        match self {
            CartError::OutOfStock { .. } => NotificationKind::OutOfStock,
            CartError::InvalidQuantity { .. } => NotificationKind::InvalidQuantity,
            CartError::FetchFailure(_) | CartError::NotInCart(_) | CartError::Storage(_) => {
                operation.failure_kind()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_and_storage_failures_use_the_operation_message() {
        let fetch = CartError::FetchFailure(CatalogError::Unavailable("down".into()));
        assert_eq!(fetch.notification_kind(Operation::Add), NotificationKind::AddFailed);
        assert_eq!(
            fetch.notification_kind(Operation::UpdateAmount),
            NotificationKind::UpdateFailed
        );

        let storage = CartError::Storage(StorageError::Unavailable("full".into()));
        assert_eq!(
            storage.notification_kind(Operation::Remove),
            NotificationKind::RemoveFailed
        );
    }

    #[test]
    fn stock_and_quantity_errors_have_their_own_kind() {
        let out = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 6,
            available: 5,
        };
        assert_eq!(out.notification_kind(Operation::Add), NotificationKind::OutOfStock);
        assert_eq!(
            out.notification_kind(Operation::UpdateAmount),
            NotificationKind::OutOfStock
        );

        let invalid = CartError::InvalidQuantity { requested: 0 };
        assert_eq!(
            invalid.notification_kind(Operation::UpdateAmount),
            NotificationKind::InvalidQuantity
        );
    }

    #[test]
    fn not_in_cart_is_a_remove_failure() {
        let err = CartError::NotInCart(ProductId::new(3));
        assert_eq!(err.notification_kind(Operation::Remove), NotificationKind::RemoveFailed);
        assert_eq!(err.to_string(), "Product 3 is not in the cart");
    }
}
