//! Types shared by every crate of the cart workspace.

pub mod types;

pub use types::ProductId;
