//! User-facing notifications and the channels that deliver them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::broadcast;

/// What went wrong, independent of wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AddFailed,
    RemoveFailed,
    UpdateFailed,
    OutOfStock,
    InvalidQuantity,
}

impl NotificationKind {
    /// Stable label used in logs, metrics and event names.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::AddFailed => "add_failed",
            NotificationKind::RemoveFailed => "remove_failed",
            NotificationKind::UpdateFailed => "update_failed",
            NotificationKind::OutOfStock => "out_of_stock",
            NotificationKind::InvalidQuantity => "invalid_quantity",
        }
    }

    /// Storefront message text. The UI matches on these strings verbatim.
    pub fn message(&self) -> &'static str {
        match self {
            NotificationKind::AddFailed => "Erro na adição do produto",
            NotificationKind::RemoveFailed => "Erro na remoção do produto",
            NotificationKind::UpdateFailed => "Erro na alteração de quantidade do produto",
            NotificationKind::OutOfStock => "Quantidade solicitada fora de estoque",
            NotificationKind::InvalidQuantity => "Quantidade solicitada deve ser no mínimo 1",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ephemeral, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Delivers notifications to the user.
///
/// `notify` is called from inside cart operations and must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification);
    }
}

/// Writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::warn!(
            kind = %notification.kind,
            message = %notification.message,
            "notification"
        );
    }
}

/// Keeps every notification in memory, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Returns the kinds received so far, in order.
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.lock().iter().map(|n| n.kind).collect()
    }

    /// Drains and returns everything received so far.
    pub fn take(&self) -> Vec<NotificationKind> {
        self.lock().drain(..).map(|n| n.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.lock().push(notification.clone());
    }
}

/// Fans notifications out to any number of live subscribers.
///
/// Notifications sent while nobody is subscribed are dropped, matching a
/// toast that nobody is around to see.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: &Notification) {
        if self.sender.send(notification.clone()).is_err() {
            tracing::debug!(kind = %notification.kind, "notification dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_storefront_text() {
        assert_eq!(
            Notification::new(NotificationKind::OutOfStock).message,
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            NotificationKind::InvalidQuantity.message(),
            "Quantidade solicitada deve ser no mínimo 1"
        );
        assert_eq!(NotificationKind::AddFailed.message(), "Erro na adição do produto");
        assert_eq!(NotificationKind::RemoveFailed.message(), "Erro na remoção do produto");
        assert_eq!(
            NotificationKind::UpdateFailed.message(),
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn kind_serializes_as_label() {
        let json = serde_json::to_value(Notification::new(NotificationKind::AddFailed)).unwrap();
        assert_eq!(json["kind"], "add_failed");
        assert_eq!(json["message"], "Erro na adição do produto");
    }

    #[test]
    fn recording_notifier_keeps_order_and_drains() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&Notification::new(NotificationKind::OutOfStock));
        notifier.notify(&Notification::new(NotificationKind::RemoveFailed));

        assert_eq!(
            notifier.kinds(),
            vec![NotificationKind::OutOfStock, NotificationKind::RemoveFailed]
        );
        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn broadcast_notifier_reaches_subscribers() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.notify(&Notification::new(NotificationKind::UpdateFailed));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, NotificationKind::UpdateFailed);
    }

    #[test]
    fn broadcast_notifier_without_subscribers_does_not_panic() {
        BroadcastNotifier::new(1).notify(&Notification::new(NotificationKind::AddFailed));
    }
}
