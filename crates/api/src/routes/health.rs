//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<usize>,
}

/// GET /health — reports whether the cart queue is still answering.
pub async fn check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.cart.cart().await {
        Ok(cart) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                products: Some(cart.len()),
            }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                products: None,
            }),
        ),
    }
}
