use sqlx::PgPool;
use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::application::product_service::ProductService;
use crate::application::user_service::UserService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::product_repository::PostgresProductRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod envelope;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) user_service: Arc<UserService<PostgresUserRepository>>,
    pub(crate) product_service: Arc<ProductService<PostgresProductRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository>>,
}

impl AppState {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self {
            user_service: Arc::new(UserService::new(PostgresUserRepository::new(pool.clone()))),
            product_service: Arc::new(ProductService::new(PostgresProductRepository::new(
                pool.clone(),
            ))),
            post_service: Arc::new(PostService::new(PostgresPostRepository::new(pool))),
        }
    }
}
