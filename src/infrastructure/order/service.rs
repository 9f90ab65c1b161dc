//! Order management service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Order, OrderId, OrderStatus, User};

/// Order operations exposed to the API layer
#[async_trait]
pub trait OrderServiceTrait: Send + Sync + Debug {
    /// The acting user's orders: sellers see orders they fulfil, buyers
    /// see orders they placed
    async fn list_for(&self, user: &User) -> Result<Vec<Order>, DomainError>;

    /// Move an order owned by the acting seller to a new status
    async fn update_status(
        &self,
        seller: &User,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, DomainError>;
}

#[derive(Debug)]
pub struct OrderService {
    orders: Arc<dyn Storage<Order>>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn Storage<Order>>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn list_for(&self, user: &User) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.list().await?;

        let mut orders: Vec<Order> = orders
            .into_iter()
            .filter(|o| {
                if user.is_seller() {
                    o.is_sold_by(user.id())
                } else {
                    o.is_bought_by(user.id())
                }
            })
            .collect();

        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(orders)
    }

    async fn update_status(
        &self,
        seller: &User,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, DomainError> {
        if !seller.is_seller() {
            return Err(DomainError::authorization(
                "Only sellers can update order status",
            ));
        }

        // Missing and not-owned orders are indistinguishable to the caller.
        let mut order = self
            .orders
            .get(id)
            .await?
            .filter(|o| o.is_sold_by(seller.id()))
            .ok_or_else(|| DomainError::not_found(format!("Order '{}' not found", id)))?;

        order.set_status(status);

        let order = self.orders.update(order).await?;

        tracing::info!(order_id = %id, status = %status, "Updated order status");

        Ok(order)
    }
}
