use crate::data::post_repository::{NewComment, NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{
    Comment, CreatePostRequest, LikeToggle, NewCommentRequest, Post, PostSummary,
    UpdatePostRequest,
};

/// A single post as the detail endpoint returns it: the aggregated
/// summary plus the full comment list, newest first.
#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: PostSummary,
    pub(crate) comments: Vec<Comment>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreatedComment {
    pub(crate) id: i64,
    pub(crate) payload: String,
}

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            description: req.description,
            user_id: req.user_id,
        };
        self.repo.create_post(new_post).await
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError> {
        self.repo.list_posts().await
    }

    /// View counting happens before the existence check: for an
    /// unknown id the UPDATE affects zero rows and the subsequent
    /// lookup reports not-found. The two statements are not atomic;
    /// the counter is advisory.
    pub(crate) async fn get_post(&self, id: i64) -> Result<PostDetail, DomainError> {
        self.repo.increment_views(id).await?;

        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))?;

        let comments = self.repo.comments_for_post(id).await?;

        Ok(PostDetail { post, comments })
    }

    pub(crate) async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            description: req.description,
        };
        self.repo.update_post(id, patch).await?;
        Ok(())
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete_post(id).await?;
        Ok(())
    }

    pub(crate) async fn toggle_like(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> Result<LikeToggle, DomainError> {
        if user_id <= 0 {
            return Err(DomainError::Validation {
                field: "userId",
                message: "must be > 0",
            });
        }
        self.repo.toggle_like(user_id, post_id).await
    }

    pub(crate) async fn add_comment(
        &self,
        post_id: i64,
        req: NewCommentRequest,
    ) -> Result<CreatedComment, DomainError> {
        let req = req.validate()?;

        let id = self
            .repo
            .add_comment(NewComment {
                user_id: req.user_id,
                post_id,
                payload: req.payload.clone(),
            })
            .await?;

        Ok(CreatedComment {
            id,
            payload: req.payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::PostService;
    use crate::data::post_repository::{NewComment, NewPost, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Comment, LikeToggle, Post, PostSummary};

    /// In-memory repository mimicking the store contracts the service
    /// relies on: a views counter bumped only by `increment_views`,
    /// a (user, post) uniqueness set guarding likes, and comments
    /// handed back newest first.
    #[derive(Clone, Default)]
    struct FakePostRepo {
        views: Arc<Mutex<i64>>,
        post_exists: Arc<Mutex<bool>>,
        likes: Arc<Mutex<HashSet<(i64, i64)>>>,
        comments: Arc<Mutex<Vec<Comment>>>,
    }

    impl FakePostRepo {
        fn with_post() -> Self {
            let repo = Self::default();
            *repo.post_exists.lock().expect("post flag mutex poisoned") = true;
            repo
        }

        fn summary(&self) -> PostSummary {
            PostSummary {
                id: 1,
                title: "title".to_string(),
                description: "description".to_string(),
                user_id: 1,
                username: "author".to_string(),
                views: *self.views.lock().expect("views mutex poisoned"),
                comment_count: self.comments.lock().expect("comments mutex poisoned").len()
                    as i64,
                like_count: self.likes.lock().expect("likes mutex poisoned").len() as i64,
                created_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            Ok(Post {
                id: 1,
                title: input.title,
                description: input.description,
                user_id: input.user_id,
                views: 0,
                created_at: Utc::now(),
            })
        }

        async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError> {
            if *self.post_exists.lock().expect("post flag mutex poisoned") {
                Ok(vec![self.summary()])
            } else {
                Ok(Vec::new())
            }
        }

        async fn increment_views(&self, _id: i64) -> Result<u64, DomainError> {
            if *self.post_exists.lock().expect("post flag mutex poisoned") {
                *self.views.lock().expect("views mutex poisoned") += 1;
                Ok(1)
            } else {
                Ok(0)
            }
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<PostSummary>, DomainError> {
            if *self.post_exists.lock().expect("post flag mutex poisoned") {
                Ok(Some(self.summary()))
            } else {
                Ok(None)
            }
        }

        async fn comments_for_post(&self, _post_id: i64) -> Result<Vec<Comment>, DomainError> {
            let mut comments = self.comments.lock().expect("comments mutex poisoned").clone();
            comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(comments)
        }

        async fn update_post(&self, _id: i64, _patch: PostPatch) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn delete_post(&self, _id: i64) -> Result<u64, DomainError> {
            Ok(0)
        }

        async fn toggle_like(
            &self,
            user_id: i64,
            post_id: i64,
        ) -> Result<LikeToggle, DomainError> {
            let mut likes = self.likes.lock().expect("likes mutex poisoned");
            if likes.insert((user_id, post_id)) {
                Ok(LikeToggle::Liked)
            } else {
                likes.remove(&(user_id, post_id));
                Ok(LikeToggle::Unliked)
            }
        }

        async fn add_comment(&self, input: NewComment) -> Result<i64, DomainError> {
            let mut comments = self.comments.lock().expect("comments mutex poisoned");
            let id = comments.len() as i64 + 1;
            comments.push(Comment {
                id,
                user_id: input.user_id,
                post_id: input.post_id,
                username: "commenter".to_string(),
                payload: input.payload,
                created_at: Utc::now(),
            });
            Ok(id)
        }
    }

    #[tokio::test]
    async fn like_toggles_across_alternating_calls() {
        let repo = FakePostRepo::with_post();
        let service = PostService::new(repo.clone());

        for round in 0..3 {
            let first = service.toggle_like(1, 7).await.expect("toggle must succeed");
            assert_eq!(first, LikeToggle::Liked, "round {round}: first call likes");
            assert!(repo.likes.lock().expect("likes mutex poisoned").contains(&(7, 1)));

            let second = service.toggle_like(1, 7).await.expect("toggle must succeed");
            assert_eq!(second, LikeToggle::Unliked, "round {round}: second call unlikes");
            assert!(!repo.likes.lock().expect("likes mutex poisoned").contains(&(7, 1)));
        }
    }

    #[tokio::test]
    async fn single_fetch_increments_views_and_listing_does_not() {
        let repo = FakePostRepo::with_post();
        let service = PostService::new(repo.clone());

        for expected in 1..=3 {
            let detail = service.get_post(1).await.expect("post must exist");
            assert_eq!(detail.post.views, expected);

            let listed = service.list_posts().await.expect("listing must succeed");
            assert_eq!(listed[0].views, expected, "listing must not change views");
        }
    }

    #[tokio::test]
    async fn get_post_attempts_the_view_bump_before_the_existence_check() {
        let repo = FakePostRepo::default();
        let service = PostService::new(repo.clone());

        let err = service.get_post(1).await.expect_err("post is absent");
        assert!(matches!(err, DomainError::NotFound(_)));
        // the zero-row UPDATE ran, but nothing meaningful mutated
        assert_eq!(*repo.views.lock().expect("views mutex poisoned"), 0);
    }

    #[tokio::test]
    async fn comments_come_back_newest_first() {
        let repo = FakePostRepo::with_post();
        let service = PostService::new(repo.clone());

        let base = Utc::now();
        for (offset, payload) in [(0, "t1"), (1, "t2"), (2, "t3")] {
            repo.comments.lock().expect("comments mutex poisoned").push(Comment {
                id: offset + 1,
                user_id: 1,
                post_id: 1,
                username: "commenter".to_string(),
                payload: payload.to_string(),
                created_at: base + Duration::seconds(offset),
            });
        }

        let detail = service.get_post(1).await.expect("post must exist");
        let order: Vec<&str> = detail.comments.iter().map(|c| c.payload.as_str()).collect();
        assert_eq!(order, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn toggle_rejects_non_positive_user_id() {
        let service = PostService::new(FakePostRepo::with_post());
        let err = service.toggle_like(1, 0).await.expect_err("must be rejected");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_post_is_silent_success() {
        let service = PostService::new(FakePostRepo::default());
        service
            .delete_post(99)
            .await
            .expect("delete of an absent post must succeed");
    }
}
