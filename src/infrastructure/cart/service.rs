//! Cart and checkout service
//!
//! One cart document per buyer. Checkout fans the cart out into one order
//! and one seller notification per line, then deletes the cart. There is
//! no cross-document transaction: a line that fails after its order was
//! created is not rolled back, and the cart is cleared even when lines
//! were skipped, since a skipped line references a product that no longer
//! exists and cannot be retried.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::{
    Cart, CartLine, DomainError, Notification, NotificationKind, Order, Product, ProductId, User,
};

/// Cart operations exposed to the API layer
#[async_trait]
pub trait CartServiceTrait: Send + Sync + Debug {
    /// The buyer's current cart lines; an absent cart reads as empty
    async fn list(&self, buyer: &User) -> Result<Vec<CartLine>, DomainError>;

    /// Add a product to the cart, merging with an existing line for the
    /// same product
    async fn add_item(
        &self,
        buyer: &User,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), DomainError>;

    /// Remove a product's line from the cart
    async fn remove_item(&self, buyer: &User, product_id: &ProductId) -> Result<(), DomainError>;

    /// Convert the cart into orders, notify each seller, and clear the cart
    async fn checkout(&self, buyer: &User) -> Result<Vec<Order>, DomainError>;

    /// Place an order for a single product without going through the cart
    async fn order_product(
        &self,
        buyer: &User,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Order, DomainError>;
}

#[derive(Debug)]
pub struct CartService {
    carts: Arc<dyn Storage<Cart>>,
    products: Arc<dyn Storage<Product>>,
    orders: Arc<dyn Storage<Order>>,
    notifications: Arc<dyn Storage<Notification>>,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn Storage<Cart>>,
        products: Arc<dyn Storage<Product>>,
        orders: Arc<dyn Storage<Order>>,
        notifications: Arc<dyn Storage<Notification>>,
    ) -> Self {
        Self {
            carts,
            products,
            orders,
            notifications,
        }
    }

    fn require_buyer(user: &User) -> Result<(), DomainError> {
        if !user.is_buyer() {
            return Err(DomainError::authorization("Only buyers can place orders"));
        }
        Ok(())
    }

    /// Create the order and seller notification for one resolved product.
    /// The pair is not transactional; a notification failure leaves the
    /// order in place.
    async fn place_order(
        &self,
        buyer: &User,
        product: &Product,
        quantity: u32,
    ) -> Result<Order, DomainError> {
        let total = product.price() * f64::from(quantity);
        let order = Order::new(
            product.id().clone(),
            buyer.id().clone(),
            product.seller_id().clone(),
            quantity,
            total,
        )?;

        let order = self.orders.create(order).await?;

        let notification = Notification::new(
            product.seller_id().clone(),
            format!("New order received for {}", product.name()),
            NotificationKind::Order,
        )
        .with_order(order.id().clone());

        if let Err(e) = self.notifications.create(notification).await {
            tracing::warn!(
                order_id = %order.id(),
                seller_id = %product.seller_id(),
                error = %e,
                "Failed to notify seller about new order"
            );
        }

        tracing::info!(
            order_id = %order.id(),
            buyer_id = %buyer.id(),
            product_id = %product.id(),
            "Placed order"
        );

        Ok(order)
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn list(&self, buyer: &User) -> Result<Vec<CartLine>, DomainError> {
        let cart = self.carts.get(buyer.id()).await?;

        Ok(cart.map(|c| c.items().to_vec()).unwrap_or_default())
    }

    async fn add_item(
        &self,
        buyer: &User,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        Self::require_buyer(buyer)?;

        if !self.products.exists(product_id).await? {
            return Err(DomainError::not_found(format!(
                "Product '{}' not found",
                product_id
            )));
        }

        let line = CartLine::new(product_id.clone(), quantity)?;

        // Read-modify-write; concurrent additions for the same buyer can
        // lose an increment. Acceptable for a single cart owner.
        match self.carts.get(buyer.id()).await? {
            Some(mut cart) => {
                cart.add(line);
                self.carts.update(cart).await?;
            }
            None => {
                self.carts.create(Cart::new(buyer.id().clone(), line)).await?;
            }
        }

        Ok(())
    }

    async fn remove_item(&self, buyer: &User, product_id: &ProductId) -> Result<(), DomainError> {
        let mut cart = self
            .carts
            .get(buyer.id())
            .await?
            .ok_or_else(|| DomainError::not_found("Cart is empty"))?;

        cart.remove(product_id);

        if cart.is_empty() {
            self.carts.delete(buyer.id()).await?;
        } else {
            self.carts.update(cart).await?;
        }

        Ok(())
    }

    async fn checkout(&self, buyer: &User) -> Result<Vec<Order>, DomainError> {
        Self::require_buyer(buyer)?;

        let cart = self
            .carts
            .get(buyer.id())
            .await?
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DomainError::validation("Cart is empty"))?;

        let mut orders = Vec::with_capacity(cart.items().len());

        for line in cart.items() {
            let product = match self.products.get(line.product_id()).await? {
                Some(product) => product,
                None => {
                    // The product was deleted after it was carted; nothing
                    // to order.
                    tracing::warn!(
                        buyer_id = %buyer.id(),
                        product_id = %line.product_id(),
                        "Skipping stale cart line at checkout"
                    );
                    continue;
                }
            };

            match self.place_order(buyer, &product, line.quantity()).await {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::error!(
                        buyer_id = %buyer.id(),
                        product_id = %line.product_id(),
                        error = %e,
                        "Failed to place order for cart line"
                    );
                }
            }
        }

        // Cleared even when lines were skipped; stale lines cannot succeed
        // on retry.
        self.carts.delete(buyer.id()).await?;

        Ok(orders)
    }

    async fn order_product(
        &self,
        buyer: &User,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Order, DomainError> {
        Self::require_buyer(buyer)?;

        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be a positive integer"));
        }

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product '{}' not found", product_id)))?;

        self.place_order(buyer, &product, quantity).await
    }
}
