//! Client-side shopping cart for the RocketShoes storefront.
//!
//! This crate provides:
//! - `Cart` and `Product`: the ordered, id-unique list of line items
//! - `CartStore`: add/remove/update-amount against the catalog, with the
//!   resulting cart persisted before it becomes current
//! - Notifications: the user-visible outcome of rejected operations
//! - `CartQueue`: a serialized command queue for callers that overlap

pub mod commands;
pub mod config;
pub mod error;
pub mod notification;
pub mod product;
pub mod queue;
pub mod store;

pub use commands::{CartChanged, UpdateProductAmount};
pub use config::{CartConfig, DEFAULT_STORAGE_KEY, ParseRemoveNoticeError, RemoveNotice};
pub use error::{CartError, Operation};
pub use notification::{
    BroadcastNotifier, LogNotifier, Notification, NotificationKind, Notifier, RecordingNotifier,
};
pub use product::{Cart, InvalidCart, Product};
pub use queue::{CartQueue, QueueClosed};
pub use store::CartStore;
