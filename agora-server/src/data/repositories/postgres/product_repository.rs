use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{FOREIGN_KEY_VIOLATION, db_error_code, map_store_error};
use crate::data::product_repository::{
    NewProduct, ProductPatch, ProductRepository, ProductWithOwner,
};
use crate::domain::error::DomainError;
use crate::domain::product::Product;

#[derive(Debug, Clone)]
pub(crate) struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    price: f64,
    photo: Option<String>,
    description: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ProductWithOwnerRow {
    id: i64,
    title: String,
    price: f64,
    photo: Option<String>,
    description: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
    username: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            photo: row.photo,
            description: row.description,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

impl From<ProductWithOwnerRow> for ProductWithOwner {
    fn from(row: ProductWithOwnerRow) -> Self {
        Self {
            product: Product {
                id: row.id,
                title: row.title,
                price: row.price,
                photo: row.photo,
                description: row.description,
                user_id: row.user_id,
                created_at: row.created_at,
            },
            username: row.username,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create_product(&self, input: NewProduct) -> Result<Product, DomainError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (title, price, photo, description, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, price, photo, description, user_id, created_at
            "#,
        )
        .bind(&input.title)
        .bind(input.price)
        .bind(&input.photo)
        .bind(&input.description)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_product_db_error)?;

        Ok(Product::from(row))
    }

    async fn list_products(&self) -> Result<Vec<ProductWithOwner>, DomainError> {
        let rows = sqlx::query_as::<_, ProductWithOwnerRow>(
            r#"
            SELECT p.id, p.title, p.price, p.photo, p.description,
                   p.user_id, p.created_at, u.username
            FROM products p
            JOIN users u ON p.user_id = u.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(rows.into_iter().map(ProductWithOwner::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductWithOwner>, DomainError> {
        let row = sqlx::query_as::<_, ProductWithOwnerRow>(
            r#"
            SELECT p.id, p.title, p.price, p.photo, p.description,
                   p.user_id, p.created_at, u.username
            FROM products p
            JOIN users u ON p.user_id = u.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(row.map(ProductWithOwner::from))
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET title = $2, price = $3, photo = $4, description = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(patch.price)
        .bind(&patch.photo)
        .bind(&patch.description)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_product(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }
}

fn map_product_db_error(err: sqlx::Error) -> DomainError {
    if db_error_code(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
        return DomainError::Validation {
            field: "userId",
            message: "referenced user does not exist",
        };
    }
    map_store_error(err)
}
