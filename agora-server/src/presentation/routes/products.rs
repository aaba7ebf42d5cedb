use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::products::{
    create_product, delete_product, get_product, list_products, update_product,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
