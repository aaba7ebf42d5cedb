use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description)?,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) description: String,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NewCommentRequest {
    pub(crate) user_id: i64,
    pub(crate) payload: String,
}

impl NewCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_positive_i64("user_id", self.user_id)?;
        let payload = self.payload.trim();
        if payload.is_empty() {
            return Err(DomainError::Validation {
                field: "payload",
                message: "must not be empty",
            });
        }
        Ok(Self {
            user_id: self.user_id,
            payload: payload.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) user_id: i64,
    pub(crate) views: i64,
    pub(crate) created_at: DateTime<Utc>,
}

/// One post as seen in listings: the row itself plus its author's
/// username and the distinct comment/liker aggregates.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PostSummary {
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

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) post_id: i64,
    pub(crate) username: String,
    pub(crate) payload: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Outcome of a like toggle: the first call for a (user, post) pair
/// likes, the next one unlikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LikeToggle {
    Liked,
    Unliked,
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(DomainError::Validation {
            field: "description",
            message: "must not be empty",
        });
    }
    Ok(description.to_string())
}
