use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Every origin is allowed and credentials are permitted, so the
/// origin is mirrored back rather than set to `*` (the wildcard cannot
/// be combined with credentials).
pub(crate) fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub(crate) fn apply_cors(router: Router) -> Router {
    router.layer(build_cors_layer())
}
