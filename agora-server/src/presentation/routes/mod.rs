use axum::Router;

use super::AppState;

pub(crate) mod posts;
pub(crate) mod products;
pub(crate) mod users;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/users", users::router())
        .nest("/api/products", products::router())
        .nest("/api/posts", posts::router())
}
