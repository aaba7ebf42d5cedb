use crate::data::product_repository::{
    NewProduct, ProductPatch, ProductRepository, ProductWithOwner,
};
use crate::domain::error::DomainError;
use crate::domain::product::{CreateProductRequest, Product, UpdateProductRequest};

pub(crate) struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The body-supplied user id is trusted as the owner; there is no
    /// caller identity to check it against.
    pub(crate) async fn create_product(
        &self,
        req: CreateProductRequest,
    ) -> Result<Product, DomainError> {
        let req = req.validate()?;

        let new_product = NewProduct {
            title: req.title,
            price: req.price,
            photo: req.photo,
            description: req.description,
            user_id: req.user_id,
        };
        self.repo.create_product(new_product).await
    }

    pub(crate) async fn list_products(&self) -> Result<Vec<ProductWithOwner>, DomainError> {
        self.repo.list_products().await
    }

    pub(crate) async fn get_product(&self, id: i64) -> Result<ProductWithOwner, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("product id: {id}")))
    }

    pub(crate) async fn update_product(
        &self,
        id: i64,
        req: UpdateProductRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let patch = ProductPatch {
            title: req.title,
            price: req.price,
            photo: req.photo,
            description: req.description,
        };
        self.repo.update_product(id, patch).await?;
        Ok(())
    }

    pub(crate) async fn delete_product(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete_product(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::ProductService;
    use crate::data::product_repository::{
        NewProduct, ProductPatch, ProductRepository, ProductWithOwner,
    };
    use crate::domain::error::DomainError;
    use crate::domain::product::{CreateProductRequest, Product};

    #[derive(Clone, Default)]
    struct FakeProductRepo {
        created_input: Arc<Mutex<Option<NewProduct>>>,
        products: Arc<Mutex<Vec<ProductWithOwner>>>,
    }

    #[async_trait]
    impl ProductRepository for FakeProductRepo {
        async fn create_product(&self, input: NewProduct) -> Result<Product, DomainError> {
            let product = Product {
                id: 1,
                title: input.title.clone(),
                price: input.price,
                photo: input.photo.clone(),
                description: input.description.clone(),
                user_id: input.user_id,
                created_at: Utc::now(),
            };
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(product)
        }

        async fn list_products(&self) -> Result<Vec<ProductWithOwner>, DomainError> {
            Ok(self.products.lock().expect("products mutex poisoned").clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<ProductWithOwner>, DomainError> {
            Ok(self
                .products
                .lock()
                .expect("products mutex poisoned")
                .iter()
                .find(|p| p.product.id == id)
                .cloned())
        }

        async fn update_product(&self, _id: i64, _patch: ProductPatch) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn delete_product(&self, _id: i64) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_the_store() {
        let repo = FakeProductRepo::default();
        let service = ProductService::new(repo.clone());

        let err = service
            .create_product(CreateProductRequest {
                title: "  ".to_string(),
                price: 10.0,
                photo: None,
                description: None,
                user_id: 1,
            })
            .await
            .expect_err("blank title must be rejected");

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(
            repo.created_input
                .lock()
                .expect("created input mutex poisoned")
                .is_none(),
            "nothing may be inserted for invalid input"
        );
    }

    #[tokio::test]
    async fn get_product_maps_absence_to_not_found() {
        let service = ProductService::new(FakeProductRepo::default());
        let err = service.get_product(5).await.expect_err("must be absent");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_product_is_silent_success() {
        let service = ProductService::new(FakeProductRepo::default());
        service
            .delete_product(5)
            .await
            .expect("delete of an absent product must succeed");
    }
}
