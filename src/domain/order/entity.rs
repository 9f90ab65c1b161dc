//! Order entity and status lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::product::ProductId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Order identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() || id.len() > 64 {
            return Err(DomainError::invalid_id(
                "Order ID must be a non-empty string of at most 64 characters",
            ));
        }

        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for OrderId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Closed order status lifecycle
///
/// Every order starts `Pending`; the owning seller moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::validation(format!(
                "Unknown order status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// An order for a single product
///
/// Immutable except for `status`, which only the owning seller may change.
/// The seller reference is denormalized from the product at creation time so
/// later product deletion does not orphan the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    product_id: ProductId,
    buyer_id: UserId,
    seller_id: UserId,
    quantity: u32,
    total_price: f64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        product_id: ProductId,
        buyer_id: UserId,
        seller_id: UserId,
        quantity: u32,
        total_price: f64,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be a positive integer"));
        }

        Ok(Self {
            id: OrderId::generate(),
            product_id,
            buyer_id,
            seller_id,
            quantity,
            total_price,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn buyer_id(&self) -> &UserId {
        &self.buyer_id
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_sold_by(&self, user_id: &UserId) -> bool {
        &self.seller_id == user_id
    }

    pub fn is_bought_by(&self, user_id: &UserId) -> bool {
        &self.buyer_id == user_id
    }

    /// Transition the status; the only mutation an order admits
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

impl StorageEntity for Order {
    type Key = OrderId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
