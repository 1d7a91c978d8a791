//! Product metadata and stock lookups.
//!
//! The cart never trusts its own copy of a product for stock decisions:
//! every mutation asks a [`CatalogService`] first. This crate provides the
//! trait, an HTTP client for the storefront's json-server API, and an
//! in-memory implementation for tests and offline demos.

pub mod error;
pub mod http;
pub mod memory;
pub mod records;
pub mod service;

pub use error::{CatalogError, Result};
pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;
pub use records::{CatalogProduct, CatalogSeed, Stock};
pub use service::CatalogService;
