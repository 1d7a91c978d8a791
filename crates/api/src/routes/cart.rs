//! Cart endpoints.
//!
//! Mutations always answer 202 with the resulting cart: a rejected
//! operation is reported on the notification stream, not as an HTTP error.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cart::{Cart, Product, UpdateProductAmount};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    pub amount: i64,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<Product>,
    /// Number of distinct products.
    pub size: usize,
    /// Sum of all amounts.
    pub units: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let size = cart.len();
        let units = cart.total_units();
        Self {
            items: cart.into_products(),
            size,
            units,
        }
    }
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid product ID: {raw}")))
}

// -- Handlers --

/// GET /cart
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.cart.cart().await?;
    Ok(Json(cart.into()))
}

/// POST /cart/items/{id}
pub async fn add(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let product_id = parse_id(&id)?;
    state.cart.add_product(product_id).await?;
    let cart = state.cart.cart().await?;
    Ok((StatusCode::ACCEPTED, Json(cart.into())))
}

/// DELETE /cart/items/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let product_id = parse_id(&id)?;
    state.cart.remove_product(product_id).await?;
    let cart = state.cart.cart().await?;
    Ok((StatusCode::ACCEPTED, Json(cart.into())))
}

/// PUT /cart/items/{id}
pub async fn update_amount(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAmountRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let product_id = parse_id(&id)?;
    state
        .cart
        .update_product_amount(UpdateProductAmount::new(product_id, req.amount))
        .await?;
    let cart = state.cart.cart().await?;
    Ok((StatusCode::ACCEPTED, Json(cart.into())))
}
