//! Serialized command queue in front of a [`CartStore`].
//!
//! The queue task owns the store and runs commands one at a time in
//! arrival order, so a mutation always starts from the cart left by the
//! previous one. [`CartQueue`] is the cloneable async handle; the task ends
//! once every handle has been dropped.

use catalog::CatalogService;
use common::ProductId;
use storage::KeyValueStore;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::commands::{CartChanged, UpdateProductAmount};
use crate::notification::Notifier;
use crate::product::Cart;
use crate::store::CartStore;

/// Commands waiting for the queue task.
const QUEUE_CAPACITY: usize = 64;

/// The queue task is no longer running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart queue is closed")]
pub struct QueueClosed;

/// Messages sent from `CartQueue` to the queue task.
///
/// Each variant carries a `oneshot::Sender` the task replies on once the
/// command has been fully processed.
enum CartCommand {
    Add {
        product_id: ProductId,
        reply: oneshot::Sender<()>,
    },
    Remove {
        product_id: ProductId,
        reply: oneshot::Sender<()>,
    },
    UpdateAmount {
        update: UpdateProductAmount,
        reply: oneshot::Sender<()>,
    },
    GetCart {
        reply: oneshot::Sender<Cart>,
    },
}

/// Cloneable handle to a cart store running behind a command queue.
#[derive(Debug, Clone)]
pub struct CartQueue {
    sender: mpsc::Sender<CartCommand>,
    changes: broadcast::Sender<CartChanged>,
}

impl std::fmt::Debug for CartCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartCommand::Add { product_id, .. } => write!(f, "Add({product_id})"),
            CartCommand::Remove { product_id, .. } => write!(f, "Remove({product_id})"),
            CartCommand::UpdateAmount { update, .. } => {
                write!(f, "UpdateAmount({}, {})", update.product_id, update.amount)
            }
            CartCommand::GetCart { .. } => f.write_str("GetCart"),
        }
    }
}

impl CartQueue {
    /// Moves `store` onto a new tokio task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S, C, N>(store: CartStore<S, C, N>) -> Self
    where
        S: KeyValueStore + 'static,
        C: CatalogService + 'static,
        N: Notifier + 'static,
    {
        let (sender, rx) = mpsc::channel(QUEUE_CAPACITY);
        let changes = store.change_sender();
        tokio::spawn(run_queue(store, rx));
        Self { sender, changes }
    }

    /// Queues an add and waits until it has been processed.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), QueueClosed> {
        self.request(|reply| CartCommand::Add { product_id, reply })
            .await
    }

    /// Queues a removal and waits until it has been processed.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), QueueClosed> {
        self.request(|reply| CartCommand::Remove { product_id, reply })
            .await
    }

    /// Queues an amount update and waits until it has been processed.
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<(), QueueClosed> {
        self.request(|reply| CartCommand::UpdateAmount { update, reply })
            .await
    }

    /// Returns the cart as left by every command queued before this call.
    pub async fn cart(&self) -> Result<Cart, QueueClosed> {
        self.request(|reply| CartCommand::GetCart { reply }).await
    }

    /// Subscribes to change events, one per committed mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> {
        self.changes.subscribe()
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> CartCommand,
    ) -> Result<T, QueueClosed> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| QueueClosed)?;
        rx.await.map_err(|_| QueueClosed)
    }
}

async fn run_queue<S, C, N>(store: CartStore<S, C, N>, mut rx: mpsc::Receiver<CartCommand>)
where
    S: KeyValueStore,
    C: CatalogService,
    N: Notifier,
{
    while let Some(command) = rx.recv().await {
        tracing::trace!(?command, "cart queue command");
        // A dropped reply receiver means the caller stopped waiting; the
        // command has still been applied.
        match command {
            CartCommand::Add { product_id, reply } => {
                store.add_product(product_id).await;
                let _ = reply.send(());
            }
            CartCommand::Remove { product_id, reply } => {
                store.remove_product(product_id).await;
                let _ = reply.send(());
            }
            CartCommand::UpdateAmount { update, reply } => {
                store.update_product_amount(update).await;
                let _ = reply.send(());
            }
            CartCommand::GetCart { reply } => {
                let _ = reply.send(store.cart().await);
            }
        }
    }

    tracing::debug!("cart queue closed, all handles dropped");
}
