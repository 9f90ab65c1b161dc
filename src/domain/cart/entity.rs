//! Cart entity and line items

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::product::ProductId;
use crate::domain::storage::StorageEntity;
use crate::domain::user::UserId;

/// A (product, quantity) pair inside a buyer's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product_id: ProductId,
    quantity: u32,
}

impl CartLine {
    pub fn new(product_id: ProductId, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be a positive integer"));
        }

        Ok(Self {
            product_id,
            quantity,
        })
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// One cart document per buyer, keyed by the buyer's ID
///
/// Invariant: at most one line per product. Adding a product already present
/// increments the existing line's quantity. An empty cart is never persisted;
/// callers delete the document when the last line is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    buyer_id: UserId,
    items: Vec<CartLine>,
}

impl Cart {
    /// Create a cart containing a single line
    pub fn new(buyer_id: UserId, first_line: CartLine) -> Self {
        Self {
            buyer_id,
            items: vec![first_line],
        }
    }

    pub fn buyer_id(&self) -> &UserId {
        &self.buyer_id
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, merging with an existing line for the same product
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.items.push(line);
        }
    }

    /// Remove the line for a product; returns true if a line was removed
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|l| &l.product_id != product_id);
        self.items.len() < before
    }
}

impl StorageEntity for Cart {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.buyer_id
    }
}
