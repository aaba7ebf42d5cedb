use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::product::Product;

#[derive(Debug, Clone)]
pub(crate) struct NewProduct {
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct ProductPatch {
    pub(crate) title: String,
    pub(crate) price: f64,
    pub(crate) photo: Option<String>,
    pub(crate) description: Option<String>,
}

/// A product joined with its owner's username, as listings return it.
#[derive(Debug, Clone)]
pub(crate) struct ProductWithOwner {
    pub(crate) product: Product,
    pub(crate) username: String,
}

#[async_trait]
pub(crate) trait ProductRepository: Send + Sync {
    async fn create_product(&self, input: NewProduct) -> Result<Product, DomainError>;
    async fn list_products(&self) -> Result<Vec<ProductWithOwner>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductWithOwner>, DomainError>;
    async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<u64, DomainError>;
    async fn delete_product(&self, id: i64) -> Result<u64, DomainError>;
}
