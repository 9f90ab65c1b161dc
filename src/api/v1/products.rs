//! Product endpoints

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Product, ProductId, ProductPatch};
use crate::infrastructure::catalog::{CreateProductRequest, ProductFilter};

#[derive(Debug, Deserialize, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub district: Option<String>,
    pub category: Option<String>,
}

fn parse_id(id: &str) -> Result<ProductId, ApiError> {
    ProductId::new(id).map_err(ApiError::from)
}

/// `GET /api/products`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .catalog_service
        .list(ProductFilter {
            category: query.category,
            district: query.district,
        })
        .await?;

    Ok(Json(products))
}

/// `GET /api/products/mine` - the acting seller's own listings
pub async fn list_mine(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog_service.list_for_seller(&user).await?;

    Ok(Json(products))
}

/// `GET /api/products/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog_service.get(&parse_id(&id)?).await?;

    Ok(Json(product))
}

/// `POST /api/products` - multipart form with text fields plus an image
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let mut name = None;
    let mut description = String::new();
    let mut price = None;
    let mut district = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => name = Some(read_text(field, "name").await?),
            "description" => description = read_text(field, "description").await?,
            "price" => {
                let raw = read_text(field, "price").await?;
                let parsed: f64 = raw.parse().map_err(|_| {
                    ApiError::bad_request(format!("Price '{}' is not a number", raw))
                        .with_param("price")
                })?;
                price = Some(parsed);
            }
            "district" => district = Some(read_text(field, "district").await?),
            "category" => category = Some(read_text(field, "category").await?),
            "image" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("Image field has no filename"))?;
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read image upload: {}", e))
                })?;

                image = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let request = CreateProductRequest {
        name: require(name, "name")?,
        description,
        price: require(price, "price")?,
        district: require(district, "district")?,
        category: require(category, "category")?,
        image,
    };

    let product = state.catalog_service.create(&user, request).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/:id`
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let patch = ProductPatch {
        name: request.name,
        description: request.description,
        price: request.price,
        district: request.district,
        category: request.category,
    };

    let product = state
        .catalog_service
        .update(&user, &parse_id(&id)?, patch)
        .await?;

    Ok(Json(product))
}

/// `DELETE /api/products/:id`
pub async fn delete(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog_service.delete(&user, &parse_id(&id)?).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read field '{}': {}", name, e)))
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ApiError::bad_request(format!("Missing required field '{}'", name)).with_param(name)
    })
}
