//! Order endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Order, OrderId, OrderStatus, ProductId};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// `GET /api/orders` - buyers see their purchases, sellers their sales
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.order_service.list_for(&user).await?;

    Ok(Json(orders))
}

/// `POST /api/orders` - order a single product without a cart
pub async fn place(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .cart_service
        .order_product(&user, &request.product_id, request.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// `PUT /api/orders/:id` - status transition by the owning seller
pub async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let id = OrderId::new(id)?;
    let status = OrderStatus::parse(&request.status)?;

    let order = state.order_service.update_status(&user, &id, status).await?;

    Ok(Json(order))
}
