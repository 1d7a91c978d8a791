//! Catalog error types.

use common::ProductId;
use thiserror::Error;

/// Errors that can occur while looking up catalog records.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no record of this kind for the id.
    #[error("No {resource} record for product {id}")]
    NotFound {
        resource: &'static str,
        id: ProductId,
    },

    /// The catalog could not be reached or refused the request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog answered with something that is not the expected record.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience type alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
