use axum::{
    Json,
    extract::FromRequest,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid request body: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

/// JSON body extractor whose rejection flows through [`AppError`], so
/// malformed bodies produce the same `{success:false, error}` envelope
/// as every other failure.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub(crate) struct BodyJson<T>(pub(crate) T);

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Auth(message) => (StatusCode::UNAUTHORIZED, message.clone()),
                // uncategorized driver failures surface as 400 from
                // entity handlers; detail is logged, not hidden
                DomainError::Store { code, message } => {
                    error!(code = code.as_deref(), "store error: {message}");
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                DomainError::Unexpected(detail) => {
                    error!("unexpected domain error: {detail}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::JsonRejection(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            AppError::Internal(err) => {
                error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: msg,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    use super::AppError;
    use crate::domain::error::DomainError;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must be readable")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body must be JSON")
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_envelope() {
        let err = AppError::Domain(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(
            body["error"]
                .as_str()
                .expect("error must be a string")
                .contains("title")
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let err = AppError::Domain(DomainError::NotFound("post id: 9".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn auth_maps_to_401_with_the_given_message() {
        let err = AppError::Domain(DomainError::Auth("invalid password".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid password");
    }

    #[tokio::test]
    async fn store_error_maps_to_400() {
        let err = AppError::Domain(DomainError::Store {
            code: Some("08006".to_string()),
            message: "connection failure".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn internal_errors_hide_detail_behind_a_generic_message() {
        let err = AppError::Internal(anyhow::anyhow!("pool exhausted on segment 7"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal error");
    }
}
