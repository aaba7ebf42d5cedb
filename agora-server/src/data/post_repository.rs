use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Comment, LikeToggle, Post, PostSummary};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) description: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) payload: String,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    /// Aggregated listing, newest first. Must not touch view counters.
    async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError>;
    /// Bumps the view counter; affects zero rows for an unknown id.
    async fn increment_views(&self, id: i64) -> Result<u64, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<PostSummary>, DomainError>;
    /// Comments for one post, newest first, with commenter usernames.
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<u64, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<u64, DomainError>;
    /// Single logical toggle: INSERT, and on a uniqueness violation
    /// DELETE the existing row instead. The primary key on
    /// (user_id, post_id) is the only guard; no check-then-act.
    async fn toggle_like(&self, user_id: i64, post_id: i64) -> Result<LikeToggle, DomainError>;
    async fn add_comment(&self, input: NewComment) -> Result<i64, DomainError>;
}
