//! Product entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Image path used when a product has no uploaded photograph
pub const DEFAULT_PRODUCT_IMAGE: &str = "/static/images/default-product.jpg";

/// Product identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() || id.len() > 64 {
            return Err(DomainError::invalid_id(
                "Product ID must be a non-empty string of at most 64 characters",
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

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ProductId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Partial update for a product; `None` fields retain their previous values
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub district: Option<String>,
    pub category: Option<String>,
}

/// A product listed by a seller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    /// Unit price; never negative
    price: f64,
    district: String,
    category: String,
    /// Owning seller; only this user may update or delete the listing
    seller_id: UserId,
    /// Denormalized for display alongside listings
    seller_name: String,
    /// Reference path to the stored image, not the binary
    image_url: String,
    created_at: DateTime<Utc>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        district: impl Into<String>,
        category: impl Into<String>,
        seller_id: UserId,
        seller_name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("Product name must not be empty"));
        }

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation("Price must be non-negative"));
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            price,
            district: district.into(),
            category: category.into(),
            seller_id,
            seller_name: seller_name.into(),
            image_url: image_url.into(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn seller_name(&self) -> &str {
        &self.seller_name
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the given user owns this listing
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.seller_id == user_id
    }

    /// Whether the listing carries the shared placeholder image
    pub fn has_default_image(&self) -> bool {
        self.image_url == DEFAULT_PRODUCT_IMAGE
    }

    /// Apply a partial update; fields absent from the patch are unchanged
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), DomainError> {
        if let Some(price) = patch.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::validation("Price must be non-negative"));
            }
            self.price = price;
        }

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Product name must not be empty"));
            }
            self.name = name;
        }

        if let Some(description) = patch.description {
            self.description = description;
        }

        if let Some(district) = patch.district {
            self.district = district;
        }

        if let Some(category) = patch.category {
            self.category = category;
        }

        Ok(())
    }
}

impl StorageEntity for Product {
    type Key = ProductId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_product() -> Product {
        Product::new(
            ProductId::generate(),
            "Pashmina Shawl",
            "Hand-woven shawl",
            1500.0,
            "Jammu",
            "handloom",
            UserId::generate(),
            "Asha Devi",
            "/static/uploads/abc123.jpg",
        )
        .unwrap()
    }

    #[test]
    fn test_product_creation() {
        let product = create_test_product();
        assert_eq!(product.name(), "Pashmina Shawl");
        assert_eq!(product.price(), 1500.0);
        assert_eq!(product.category(), "handloom");
        assert!(!product.has_default_image());
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Product::new(
            ProductId::generate(),
            "Shawl",
            "",
            -1.0,
            "Jammu",
            "handloom",
            UserId::generate(),
            "Asha",
            DEFAULT_PRODUCT_IMAGE,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Product::new(
            ProductId::generate(),
            "  ",
            "",
            10.0,
            "Jammu",
            "handloom",
            UserId::generate(),
            "Asha",
            DEFAULT_PRODUCT_IMAGE,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ownership_check() {
        let product = create_test_product();
        assert!(product.is_owned_by(product.seller_id()));
        assert!(!product.is_owned_by(&UserId::generate()));
    }

    #[test]
    fn test_apply_patch_partial() {
        let mut product = create_test_product();
        let original_description = product.description().to_string();

        product
            .apply(ProductPatch {
                price: Some(1800.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(product.price(), 1800.0);
        assert_eq!(product.description(), original_description);
        assert_eq!(product.name(), "Pashmina Shawl");
    }

    #[test]
    fn test_apply_patch_rejects_bad_price() {
        let mut product = create_test_product();

        let result = product.apply(ProductPatch {
            price: Some(f64::NAN),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(product.price(), 1500.0);
    }

    #[test]
    fn test_default_image_detection() {
        let product = Product::new(
            ProductId::generate(),
            "Basket",
            "",
            50.0,
            "Kathua",
            "wickerwork",
            UserId::generate(),
            "Ram",
            DEFAULT_PRODUCT_IMAGE,
        )
        .unwrap();

        assert!(product.has_default_image());
    }

    #[test]
    fn test_product_id_validation() {
        assert!(ProductId::new("").is_err());
        assert!(ProductId::new("p-1").is_ok());
    }
}
