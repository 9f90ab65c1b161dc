//! Cart and checkout endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{CartLine, Order, ProductId};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Orders created from the cart; stale lines are skipped, so this can
    /// be shorter than the cart was
    pub orders: Vec<Order>,
}

/// `GET /api/cart`
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<CartLine>>, ApiError> {
    let items = state.cart_service.list(&user).await?;

    Ok(Json(items))
}

/// `POST /api/cart`
pub async fn add_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddItemRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .cart_service
        .add_item(&user, &request.product_id, request.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/cart/:productId`
pub async fn remove_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id = ProductId::new(product_id)?;

    state.cart_service.remove_item(&user, &product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let orders = state.cart_service.checkout(&user).await?;

    Ok(Json(CheckoutResponse { orders }))
}
