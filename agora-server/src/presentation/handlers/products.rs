use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::product_repository::ProductWithOwner;
use crate::domain::product::{CreateProductRequest, Product, UpdateProductRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, BodyJson};
use crate::presentation::envelope::{Envelope, MessageBody, message, ok};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(range(min = 0.0))]
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProductDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(range(min = 0.0))]
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

/// A product with its owner's username, as the read endpoints return
/// it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductWithOwnerDto {
    #[serde(flatten)]
    pub(crate) product: ProductDto,
    pub(crate) username: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            photo: product.photo,
            description: product.description,
            user_id: product.user_id,
            created_at: product.created_at,
        }
    }
}

impl From<ProductWithOwner> for ProductWithOwnerDto {
    fn from(record: ProductWithOwner) -> Self {
        Self {
            product: ProductDto::from(record.product),
            username: record.username,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Validation error or unknown owner")
    )
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    BodyJson(dto): BodyJson<CreateProductDto>,
) -> AppResult<(StatusCode, Json<Envelope<ProductDto>>)> {
    dto.validate()?;

    let req = CreateProductRequest {
        title: dto.title,
        price: dto.price,
        photo: dto.photo,
        description: dto.description,
        user_id: dto.user_id,
    };

    let product = state.product_service.create_product(req).await?;
    Ok((StatusCode::CREATED, ok(ProductDto::from(product))))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Products with owner usernames, newest first")
    )
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<ProductWithOwnerDto>>>> {
    let products = state.product_service.list_products().await?;
    Ok(ok(products
        .into_iter()
        .map(ProductWithOwnerDto::from)
        .collect()))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductWithOwnerDto),
        (status = 404, description = "Product not found")
    )
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<ProductWithOwnerDto>>> {
    let product = state.product_service.get_product(id).await?;
    Ok(ok(ProductWithOwnerDto::from(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product fields replaced", body = MessageBody),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    BodyJson(dto): BodyJson<UpdateProductDto>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    dto.validate()?;

    let req = UpdateProductRequest {
        title: dto.title,
        price: dto.price,
        photo: dto.photo,
        description: dto.description,
    };

    state.product_service.update_product(id, req).await?;
    Ok(message("product updated"))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = MessageBody)
    )
)]
pub(crate) async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    state.product_service.delete_product(id).await?;
    Ok(message("product deleted"))
}
