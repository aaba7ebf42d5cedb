use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::post_service::{CreatedComment, PostDetail};
use crate::domain::post::{
    Comment, CreatePostRequest, LikeToggle, NewCommentRequest, Post, PostSummary,
    UpdatePostRequest,
};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, BodyJson};
use crate::presentation::envelope::{Envelope, MessageBody, message, ok};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) description: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeDto {
    pub(crate) user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCommentDto {
    pub(crate) user_id: i64,
    #[validate(length(min = 1))]
    pub(crate) payload: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
    pub(crate) views: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostSummaryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) views: i64,
    pub(crate) comment_count: i64,
    pub(crate) like_count: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) username: String,
    pub(crate) payload: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Detail view: the summary fields inline plus the full comment list.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    #[serde(flatten)]
    pub(crate) post: PostSummaryDto,
    pub(crate) comments: Vec<CommentDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedCommentDto {
    pub(crate) id: i64,
    pub(crate) payload: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            user_id: post.user_id,
            views: post.views,
            created_at: post.created_at,
        }
    }
}

impl From<PostSummary> for PostSummaryDto {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            user_id: post.user_id,
            username: post.username,
            views: post.views,
            comment_count: post.comment_count,
            like_count: post.like_count,
            created_at: post.created_at,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            username: comment.username,
            payload: comment.payload,
            created_at: comment.created_at,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: PostSummaryDto::from(detail.post),
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error or unknown author")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    BodyJson(dto): BodyJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<Envelope<PostDto>>)> {
    dto.validate()?;

    let req = CreatePostRequest {
        title: dto.title,
        description: dto.description,
        user_id: dto.user_id,
    };

    let post = state.post_service.create_post(req).await?;
    Ok((StatusCode::CREATED, ok(PostDto::from(post))))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts with aggregates, newest first; view counters untouched")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<Json<Envelope<Vec<PostSummaryDto>>>> {
    let posts = state.post_service.list_posts().await?;
    Ok(ok(posts.into_iter().map(PostSummaryDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with comments; view counter incremented", body = PostDetailDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<PostDetailDto>>> {
    let detail = state.post_service.get_post(id).await?;
    Ok(ok(PostDetailDto::from(detail)))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post fields replaced", body = MessageBody),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    BodyJson(dto): BodyJson<UpdatePostDto>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    dto.validate()?;

    let req = UpdatePostRequest {
        title: dto.title,
        description: dto.description,
    };

    state.post_service.update_post(id, req).await?;
    Ok(message("post updated"))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = MessageBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    state.post_service.delete_post(id).await?;
    Ok(message("post deleted"))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = LikeDto,
    responses(
        (status = 200, description = "Toggled: first call likes, second unlikes", body = MessageBody),
        (status = 400, description = "Unknown user or post")
    )
)]
pub(crate) async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    BodyJson(dto): BodyJson<LikeDto>,
) -> AppResult<Json<Envelope<MessageBody>>> {
    let outcome = state.post_service.toggle_like(id, dto.user_id).await?;

    Ok(match outcome {
        LikeToggle::Liked => message("post liked"),
        LikeToggle::Unliked => message("post unliked"),
    })
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CreatedCommentDto),
        (status = 400, description = "Validation error or unknown user/post")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    BodyJson(dto): BodyJson<CreateCommentDto>,
) -> AppResult<(StatusCode, Json<Envelope<CreatedCommentDto>>)> {
    dto.validate()?;

    let req = NewCommentRequest {
        user_id: dto.user_id,
        payload: dto.payload,
    };

    let created = state.post_service.add_comment(id, req).await?;
    Ok((StatusCode::CREATED, ok(CreatedCommentDto::from(created))))
}

impl From<CreatedComment> for CreatedCommentDto {
    fn from(comment: CreatedComment) -> Self {
        Self {
            id: comment.id,
            payload: comment.payload,
        }
    }
}
