use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION, db_error_code, map_store_error};
use crate::data::post_repository::{NewComment, NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, LikeToggle, Post, PostSummary};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    description: String,
    user_id: i64,
    views: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    id: i64,
    title: String,
    description: String,
    user_id: i64,
    username: String,
    views: i64,
    comment_count: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    user_id: i64,
    post_id: i64,
    username: String,
    payload: String,
    created_at: DateTime<Utc>,
}

impl From<PostSummaryRow> for PostSummary {
    fn from(row: PostSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            user_id: row.user_id,
            username: row.username,
            views: row.views,
            comment_count: row.comment_count,
            like_count: row.like_count,
            created_at: row.created_at,
        }
    }
}

// A LEFT JOIN against both comments and likes multiplies rows, so the
// aggregates must count DISTINCT ids.
const POST_SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.title, p.description, p.user_id, p.views, p.created_at,
           u.username,
           COUNT(DISTINCT c.id) AS comment_count,
           COUNT(DISTINCT l.user_id) AS like_count
    FROM posts p
    JOIN users u ON p.user_id = u.id
    LEFT JOIN comments c ON c.post_id = p.id
    LEFT JOIN likes l ON l.post_id = p.id
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id, views, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(Post {
            id: row.id,
            title: row.title,
            description: row.description,
            user_id: row.user_id,
            views: row.views,
            created_at: row.created_at,
        })
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError> {
        let sql = format!(
            "{POST_SUMMARY_SELECT}
            GROUP BY p.id, u.username
            ORDER BY p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PostSummaryRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn increment_views(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostSummary>, DomainError> {
        let sql = format!(
            "{POST_SUMMARY_SELECT}
            WHERE p.id = $1
            GROUP BY p.id, u.username"
        );
        let row = sqlx::query_as::<_, PostSummaryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(row.map(PostSummary::from))
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.user_id, c.post_id, c.payload, c.created_at, u.username
            FROM comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Comment {
                id: r.id,
                user_id: r.user_id,
                post_id: r.post_id,
                username: r.username,
                payload: r.payload,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_post(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }

    async fn toggle_like(&self, user_id: i64, post_id: i64) -> Result<LikeToggle, DomainError> {
        let inserted = sqlx::query("INSERT INTO likes (user_id, post_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(_) => Ok(LikeToggle::Liked),
            Err(err) if db_error_code(&err).as_deref() == Some(UNIQUE_VIOLATION) => {
                sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
                    .bind(user_id)
                    .bind(post_id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_store_error)?;
                Ok(LikeToggle::Unliked)
            }
            Err(err) => Err(map_post_db_error(err)),
        }
    }

    async fn add_comment(&self, input: NewComment) -> Result<i64, DomainError> {
        #[derive(sqlx::FromRow)]
        struct InsertedId {
            id: i64,
        }

        let row = sqlx::query_as::<_, InsertedId>(
            r#"
            INSERT INTO comments (user_id, post_id, payload)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(input.post_id)
        .bind(&input.payload)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.id)
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if db_error_code(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
        return DomainError::Validation {
            field: "userId",
            message: "referenced user or post does not exist",
        };
    }
    map_store_error(err)
}
