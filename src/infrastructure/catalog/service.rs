//! Catalog service
//!
//! Product listings: browse with filters, seller-gated create, and
//! owner-gated update and delete. A missing product and a product owned
//! by somebody else produce the same not-found error, so callers cannot
//! probe for other sellers' listings.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Product, ProductId, ProductPatch, User};
use crate::infrastructure::assets::AssetStore;

/// Browse filter; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub district: Option<String>,
}

/// Request to create a product listing
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub district: String,
    pub category: String,
    /// Uploaded image as (original filename, bytes)
    pub image: Option<(String, Bytes)>,
}

/// Catalog operations exposed to the API layer
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync + Debug {
    /// List products matching the filter
    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError>;

    /// List the acting seller's own products
    async fn list_for_seller(&self, seller: &User) -> Result<Vec<Product>, DomainError>;

    /// Fetch a single product
    async fn get(&self, id: &ProductId) -> Result<Product, DomainError>;

    /// Create a listing; the acting user must be a seller and must attach
    /// an image
    async fn create(
        &self,
        seller: &User,
        request: CreateProductRequest,
    ) -> Result<Product, DomainError>;

    /// Partially update a listing owned by the acting seller
    async fn update(
        &self,
        seller: &User,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, DomainError>;

    /// Delete a listing owned by the acting seller, removing its stored
    /// image on a best-effort basis
    async fn delete(&self, seller: &User, id: &ProductId) -> Result<(), DomainError>;
}

#[derive(Debug)]
pub struct CatalogService {
    products: Arc<dyn Storage<Product>>,
    assets: Arc<dyn AssetStore>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn Storage<Product>>, assets: Arc<dyn AssetStore>) -> Self {
        Self { products, assets }
    }

    /// Owner-gated fetch. Missing and not-owned both come back as
    /// not-found.
    async fn get_owned(&self, seller: &User, id: &ProductId) -> Result<Product, DomainError> {
        let product = self
            .products
            .get(id)
            .await?
            .filter(|p| p.is_owned_by(seller.id()))
            .ok_or_else(|| DomainError::not_found(format!("Product '{}' not found", id)))?;

        Ok(product)
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        let products = self.products.list().await?;

        Ok(products
            .into_iter()
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| p.category().eq_ignore_ascii_case(c))
                    && filter
                        .district
                        .as_deref()
                        .is_none_or(|d| p.district().eq_ignore_ascii_case(d))
            })
            .collect())
    }

    async fn list_for_seller(&self, seller: &User) -> Result<Vec<Product>, DomainError> {
        let products = self.products.list().await?;

        Ok(products
            .into_iter()
            .filter(|p| p.is_owned_by(seller.id()))
            .collect())
    }

    async fn get(&self, id: &ProductId) -> Result<Product, DomainError> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product '{}' not found", id)))
    }

    async fn create(
        &self,
        seller: &User,
        request: CreateProductRequest,
    ) -> Result<Product, DomainError> {
        if !seller.is_seller() {
            return Err(DomainError::authorization("Only sellers can list products"));
        }

        let (filename, bytes) = request
            .image
            .ok_or_else(|| DomainError::validation("A product image is required"))?;

        let image_url = self.assets.store_image(&filename, bytes).await?;

        let product = Product::new(
            ProductId::generate(),
            request.name,
            request.description,
            request.price,
            request.district,
            request.category,
            seller.id().clone(),
            seller.name(),
            image_url,
        )?;

        let product = self.products.create(product).await?;

        tracing::info!(
            product_id = %product.id(),
            seller_id = %seller.id(),
            "Created product listing"
        );

        Ok(product)
    }

    async fn update(
        &self,
        seller: &User,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, DomainError> {
        let mut product = self.get_owned(seller, id).await?;

        product.apply(patch)?;

        self.products.update(product).await
    }

    async fn delete(&self, seller: &User, id: &ProductId) -> Result<(), DomainError> {
        let product = self.get_owned(seller, id).await?;

        self.products.delete(id).await?;

        // The record is gone; a leftover image file is not worth failing
        // the request over.
        if !product.has_default_image() {
            if let Err(e) = self.assets.remove(product.image_url()).await {
                tracing::warn!(
                    product_id = %id,
                    image_url = product.image_url(),
                    error = %e,
                    "Failed to remove product image"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};
    use crate::domain::DEFAULT_PRODUCT_IMAGE;
    use crate::infrastructure::assets::mock::MockAssetStore;
    use crate::infrastructure::storage::InMemoryStorage;

    fn seller() -> User {
        User::new(
            UserId::generate(),
            "Asha Devi",
            "asha@example.com",
            "hash",
            Role::Seller,
        )
    }

    fn buyer() -> User {
        User::new(
            UserId::generate(),
            "Ravi",
            "ravi@example.com",
            "hash",
            Role::Buyer,
        )
    }

    fn service() -> (CatalogService, Arc<MockAssetStore>) {
        let assets = Arc::new(MockAssetStore::default());
        let service = CatalogService::new(
            Arc::new(InMemoryStorage::<Product>::new()),
            assets.clone(),
        );
        (service, assets)
    }

    fn create_request(name: &str, category: &str, district: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            description: "Handmade".to_string(),
            price: 500.0,
            district: district.to_string(),
            category: category.to_string(),
            image: Some(("photo.jpg".to_string(), Bytes::from_static(b"jpeg"))),
        }
    }

    #[tokio::test]
    async fn test_create_requires_seller_role() {
        let (service, _) = service();

        let result = service
            .create(&buyer(), create_request("Shawl", "handloom", "Jammu"))
            .await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));
    }

    #[tokio::test]
    async fn test_create_requires_image() {
        let (service, _) = service();
        let mut request = create_request("Shawl", "handloom", "Jammu");
        request.image = None;

        let result = service.create(&seller(), request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_stores_image_reference() {
        let (service, assets) = service();

        let product = service
            .create(&seller(), create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        assert!(product.image_url().starts_with("/static/uploads/"));
        assert_eq!(assets.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (service, _) = service();
        let asha = seller();

        service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();
        service
            .create(&asha, create_request("Basket", "wickerwork", "Kathua"))
            .await
            .unwrap();

        let all = service.list(ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let handloom = service
            .list(ProductFilter {
                category: Some("handloom".to_string()),
                district: None,
            })
            .await
            .unwrap();
        assert_eq!(handloom.len(), 1);
        assert_eq!(handloom[0].name(), "Shawl");

        let kathua_handloom = service
            .list(ProductFilter {
                category: Some("handloom".to_string()),
                district: Some("Kathua".to_string()),
            })
            .await
            .unwrap();
        assert!(kathua_handloom.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let (service, _) = service();
        service
            .create(&seller(), create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        let first = service.list(ProductFilter::default()).await.unwrap();
        let second = service.list(ProductFilter::default()).await.unwrap();

        let mut first_ids: Vec<_> = first.iter().map(|p| p.id().to_string()).collect();
        let mut second_ids: Vec<_> = second.iter().map(|p| p.id().to_string()).collect();
        first_ids.sort();
        second_ids.sort();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_looks_like_missing() {
        let (service, _) = service();
        let asha = seller();
        let other = seller();

        let product = service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        let not_owner = service
            .update(
                &other,
                product.id(),
                ProductPatch {
                    price: Some(900.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let missing = service
            .update(&other, &ProductId::generate(), ProductPatch::default())
            .await
            .unwrap_err();

        assert!(not_owner.is_not_found());
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let (service, _) = service();
        let asha = seller();

        let product = service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        let updated = service
            .update(
                &asha,
                product.id(),
                ProductPatch {
                    price: Some(750.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price(), 750.0);
        assert_eq!(updated.name(), "Shawl");
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_same_error_as_missing() {
        let (service, _) = service();
        let asha = seller();
        let other = seller();

        let product = service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        let not_owner = service.delete(&other, product.id()).await.unwrap_err();
        let missing = service.delete(&other, &ProductId::generate()).await.unwrap_err();

        assert!(not_owner.is_not_found());
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_image() {
        let (service, assets) = service();
        let asha = seller();

        let product = service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();

        service.delete(&asha, product.id()).await.unwrap();

        let removed = assets.removed.lock().unwrap();
        assert_eq!(removed.as_slice(), &[product.image_url().to_string()]);
    }

    #[tokio::test]
    async fn test_delete_keeps_placeholder_image() {
        let assets = Arc::new(MockAssetStore::default());
        let storage = Arc::new(InMemoryStorage::<Product>::new());
        let service = CatalogService::new(storage.clone(), assets.clone());
        let asha = seller();

        let product = Product::new(
            ProductId::generate(),
            "Seeded",
            "",
            10.0,
            "Jammu",
            "misc",
            asha.id().clone(),
            asha.name(),
            DEFAULT_PRODUCT_IMAGE,
        )
        .unwrap();
        storage.create(product.clone()).await.unwrap();

        service.delete(&asha, product.id()).await.unwrap();

        assert!(assets.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_for_seller() {
        let (service, _) = service();
        let asha = seller();
        let other = seller();

        service
            .create(&asha, create_request("Shawl", "handloom", "Jammu"))
            .await
            .unwrap();
        service
            .create(&other, create_request("Basket", "wickerwork", "Kathua"))
            .await
            .unwrap();

        let mine = service.list_for_seller(&asha).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name(), "Shawl");
    }
}
