//! The cart store: in-memory cart, persisted snapshot, catalog checks.

use catalog::CatalogService;
use common::ProductId;
use storage::{KeyValueStore, KeyValueStoreExt};
use tokio::sync::{RwLock, broadcast};

use crate::commands::{CartChanged, UpdateProductAmount};
use crate::config::{CartConfig, RemoveNotice};
use crate::error::{CartError, Operation};
use crate::notification::{Notification, NotificationKind, Notifier};
use crate::product::{Cart, Product};

/// Holds the shopping cart and mediates every change to it.
///
/// Each mutation reads the current cart, consults the catalog, and, if the
/// change is accepted, writes the new snapshot to storage before replacing
/// the in-memory cart. A crash between the two steps therefore leaves the
/// persisted snapshot as the state restored by the next [`open`](Self::open).
///
/// Mutations never return errors. A rejected mutation produces exactly one
/// notification and leaves the cart untouched.
///
/// The store takes no lock across the catalog round trip. Two overlapping
/// mutations each derive their result from the cart they saw before
/// awaiting, so the later commit silently discards the earlier one. Use
/// [`CartQueue`](crate::CartQueue) when callers can overlap.
pub struct CartStore<S, C, N>
where
    S: KeyValueStore,
    C: CatalogService,
    N: Notifier,
{
    storage: S,
    catalog: C,
    notifier: N,
    config: CartConfig,
    cart: RwLock<Cart>,
    changes: broadcast::Sender<CartChanged>,
}

impl<S, C, N> CartStore<S, C, N>
where
    S: KeyValueStore,
    C: CatalogService,
    N: Notifier,
{
    /// Opens the store, restoring the cart persisted under the configured key.
    ///
    /// A missing key yields an empty cart. A snapshot that cannot be decoded,
    /// or that breaks the cart invariants, fails with [`CartError::Storage`].
    #[tracing::instrument(skip_all, fields(key = %config.storage_key))]
    pub async fn open(
        storage: S,
        catalog: C,
        notifier: N,
        config: CartConfig,
    ) -> Result<Self, CartError> {
        let cart: Cart = storage
            .get_json(&config.storage_key)
            .await?
            .unwrap_or_default();

        tracing::info!(products = cart.len(), units = cart.total_units(), "cart restored");

        let (changes, _) = broadcast::channel(config.change_capacity.max(1));

        Ok(Self {
            storage,
            catalog,
            notifier,
            config,
            cart: RwLock::new(cart),
            changes,
        })
    }

    /// Returns the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Subscribes to change events, one per committed mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> {
        self.changes.subscribe()
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub(crate) fn change_sender(&self) -> broadcast::Sender<CartChanged> {
        self.changes.clone()
    }

    /// Adds one unit of a product.
    ///
    /// A product not yet in the cart is appended with amount 1. A product
    /// already in the cart is incremented while its amount is below the
    /// available stock, and rejected with an out-of-stock notification
    /// otherwise.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_add_product(product_id).await {
            self.reject(Operation::Add, &e);
        }
    }

    /// Removes a product.
    ///
    /// Under [`RemoveNotice::Always`] a remove-failure notification follows
    /// even a successful removal.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) {
        match self.try_remove_product(product_id).await {
            Ok(()) => {
                if self.config.remove_notice == RemoveNotice::Always {
                    tracing::debug!("removal committed, emitting remove notice");
                    self.emit(Operation::Remove, NotificationKind::RemoveFailed);
                }
            }
            Err(e) => self.reject(Operation::Remove, &e),
        }
    }

    /// Sets the amount of a product.
    ///
    /// The amount must be between 1 and the available stock. Zero is
    /// rejected, never treated as a removal. An id that is not in the cart
    /// is accepted and re-persists the unchanged cart.
    #[tracing::instrument(skip_all, fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        if let Err(e) = self.try_update_product_amount(update).await {
            self.reject(Operation::UpdateAmount, &e);
        }
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let current = self.cart().await;

        let (product, stock) = tokio::try_join!(
            self.catalog.product(product_id),
            self.catalog.stock(product_id)
        )?;

        let next = match current.get(product_id) {
            None => current.with_appended(Product::from_catalog(product)),
            Some(existing) if existing.amount < stock.amount => {
                current.with_amount(product_id, existing.amount + 1)
            }
            Some(existing) => {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: i64::from(existing.amount) + 1,
                    available: stock.amount,
                });
            }
        };

        self.commit(Operation::Add, next).await
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let current = self.cart().await;
        let next = current
            .without(product_id)
            .ok_or(CartError::NotInCart(product_id))?;

        self.commit(Operation::Remove, next).await
    }

    async fn try_update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        let current = self.cart().await;

        let stock = self.catalog.stock(product_id).await?;

        if amount < 1 {
            return Err(CartError::InvalidQuantity { requested: amount });
        }

        let out_of_stock = CartError::OutOfStock {
            product_id,
            requested: amount,
            available: stock.amount,
        };
        if amount > i64::from(stock.amount) {
            return Err(out_of_stock);
        }
        let amount = u32::try_from(amount).map_err(|_| out_of_stock)?;

        let next = current.with_amount(product_id, amount);
        self.commit(Operation::UpdateAmount, next).await
    }

    /// Persists `next`, then makes it the current cart and announces it.
    async fn commit(&self, operation: Operation, next: Cart) -> Result<(), CartError> {
        self.storage.set_json(&self.config.storage_key, &next).await?;

        *self.cart.write().await = next.clone();

        metrics::counter!("cart_mutations_total", "operation" => operation.as_str()).increment(1);
        tracing::debug!(
            operation = %operation,
            products = next.len(),
            units = next.total_units(),
            "cart committed"
        );

        // No subscribers is fine.
        let _ = self.changes.send(CartChanged::new(operation, next));
        Ok(())
    }

    fn reject(&self, operation: Operation, error: &CartError) {
        tracing::warn!(operation = %operation, error = %error, "cart operation rejected");
        self.emit(operation, error.notification_kind(operation));
    }

    fn emit(&self, operation: Operation, kind: NotificationKind) {
        metrics::counter!(
            "cart_notifications_total",
            "operation" => operation.as_str(),
            "kind" => kind.as_str()
        )
        .increment(1);
        self.notifier.notify(&Notification::new(kind));
    }
}
