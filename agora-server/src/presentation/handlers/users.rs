use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::user_service::Profile;
use crate::data::user_repository::CreatedUser;
use crate::domain::user::{LoginRequest, SignupRequest, UpdateUserRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, BodyJson};
use crate::presentation::envelope::{Envelope, MessageBody, message, ok};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SignupDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
    pub(crate) phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateUserDto {
    #[validate(email)]
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) avatar: Option<String>,
}

/// Public projection of a user. There is deliberately no password
/// field anywhere in this type.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) avatar: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AccountDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

impl From<CreatedUser> for AccountDto {
    fn from(user: CreatedUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<Profile> for AccountDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users listed newest first, passwords excluded"),
        (status = 400, description = "Store error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<UserDto>>>> {
    let users = state.user_service.list_users().await?;
    Ok(ok(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = "users",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = AccountDto),
        (status = 400, description = "Validation error or duplicate username")
    )
)]
pub(crate) async fn signup(
    State(state): State<AppState>,
    BodyJson(dto): BodyJson<SignupDto>,
) -> AppResult<(StatusCode, Json<Envelope<AccountDto>>)> {
    dto.validate()?;

    let req = SignupRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
        phone: dto.phone,
    };

    let created = state.user_service.signup(req).await?;
    Ok((StatusCode::CREATED, ok(AccountDto::from(created))))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful, no token issued", body = AccountDto),
        (status = 401, description = "Unknown username or wrong password")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    BodyJson(dto): BodyJson<LoginDto>,
) -> AppResult<Json<Envelope<AccountDto>>> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let profile = state.user_service.login(req).await?;
    Ok(ok(AccountDto::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<UserDto>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(ok(UserDto::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Profile fields replaced", body = MessageBody),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    BodyJson(dto): BodyJson<UpdateUserDto>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    dto.validate()?;

    let req = UpdateUserRequest {
        email: dto.email,
        phone: dto.phone,
        avatar: dto.avatar,
    };

    state.user_service.update_user(id, req).await?;
    Ok(message("user updated"))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = MessageBody)
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    state.user_service.delete_user(id).await?;
    Ok(message("user deleted"))
}
