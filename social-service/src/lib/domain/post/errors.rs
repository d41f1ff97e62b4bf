use thiserror::Error;

use crate::post::models::PostId;

/// Error for post and comment body validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("Body must not be empty")]
    Empty,
}

/// Top-level error for posts, comments and likes
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid body: {0}")]
    InvalidBody(#[from] BodyError),

    #[error("Post not found")]
    PostNotFound(PostId),

    #[error("Post already liked")]
    AlreadyLiked(PostId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
