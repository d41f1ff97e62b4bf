use std::fmt;

use serde::Deserialize;

use crate::post::errors::BodyError;
use crate::user::models::UserId;

/// Post identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LikeId(pub i64);

/// Text of a post or comment.
///
/// Never empty or whitespace only. The text is kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body(String);

impl Body {
    /// # Errors
    /// * `Empty` - Body is empty or whitespace only
    pub fn new(body: String) -> Result<Self, BodyError> {
        if body.trim().is_empty() {
            return Err(BodyError::Empty);
        }
        Ok(Body(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub body: Body,
    pub user_id: UserId,
}

/// Post together with its like count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithLikes {
    pub post: Post,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub body: Body,
    pub post_id: PostId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: LikeId,
    pub post_id: PostId,
    pub user_id: UserId,
}

/// A post with its like count and all of its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: PostWithLikes,
    pub comments: Vec<Comment>,
}

/// Order of the post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSorting {
    /// Newest first
    #[default]
    New,
    /// Oldest first
    Old,
    /// Most liked first, newest first among equals
    MostLikes,
}

/// Command to publish a post
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub body: Body,
}

impl CreatePostCommand {
    pub fn new(body: Body) -> Self {
        Self { body }
    }
}

/// Command to comment on a post
#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    pub body: Body,
    pub post_id: PostId,
}

impl CreateCommentCommand {
    pub fn new(body: Body, post_id: PostId) -> Self {
        Self { body, post_id }
    }
}

/// Post data handed to the repository; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub body: Body,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub body: Body,
    pub post_id: PostId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLike {
    pub post_id: PostId,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_rejects_blank() {
        assert_eq!(Body::new(String::new()), Err(BodyError::Empty));
        assert_eq!(Body::new("  \n\t".to_string()), Err(BodyError::Empty));
    }

    #[test]
    fn test_body_keeps_text() {
        let body = Body::new(" hello ".to_string()).unwrap();
        assert_eq!(body.as_str(), " hello ");
    }

    #[test]
    fn test_sorting_parses_snake_case() {
        let sorting: PostSorting = serde_json::from_str("\"most_likes\"").unwrap();
        assert_eq!(sorting, PostSorting::MostLikes);
        assert_eq!(PostSorting::default(), PostSorting::New);
        assert!(serde_json::from_str::<PostSorting>("\"random\"").is_err());
    }
}
