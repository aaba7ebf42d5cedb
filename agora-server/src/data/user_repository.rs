use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) phone: Option<String>,
}

/// The row a successful INSERT reports back: generated id plus the
/// unique fields, never the hash.
#[derive(Debug, Clone)]
pub(crate) struct CreatedUser {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
}

/// Login lookup result. The only place the stored hash crosses the
/// data-layer boundary.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserPatch {
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) avatar: Option<String>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<CreatedUser, DomainError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserCredentials>, DomainError>;
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<u64, DomainError>;
    async fn delete_user(&self, id: i64) -> Result<u64, DomainError>;
}
