use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{UNIQUE_VIOLATION, db_error_code, map_store_error};
use crate::data::user_repository::{
    CreatedUser, NewUser, UserCredentials, UserPatch, UserRepository,
};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    phone: Option<String>,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CreatedUserRow {
    id: i64,
    username: String,
    email: String,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            phone: row.phone,
            avatar: row.avatar,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<CreatedUser, DomainError> {
        let row = sqlx::query_as::<_, CreatedUserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(CreatedUser {
            id: row.id,
            username: row.username,
            email: row.email,
        })
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(row.map(|r| UserCredentials {
            id: r.id,
            username: r.username,
            email: r.email,
            password_hash: r.password_hash,
        }))
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, phone, avatar, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, phone, avatar, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(row.map(User::from))
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, phone = $3, avatar = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.avatar)
        .execute(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if db_error_code(&err).as_deref() == Some(UNIQUE_VIOLATION) {
        return DomainError::Validation {
            field: "username",
            message: "already taken",
        };
    }
    map_store_error(err)
}
