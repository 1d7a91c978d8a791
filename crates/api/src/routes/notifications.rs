//! Server-sent stream of cart notifications.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;

use crate::AppState;

/// GET /notifications
///
/// Each notification becomes one event named after its kind, with the
/// user-facing message as data. Only notifications raised after the client
/// connects are delivered.
pub async fn stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifications.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    let event = Event::default()
                        .event(notification.kind.as_str())
                        .data(notification.message);
                    return Some((Ok::<_, Infallible>(event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
