use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::users::{
    delete_user, get_user, list_users, login, signup, update_user,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
