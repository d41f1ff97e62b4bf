use async_trait::async_trait;

use crate::domain::post::models::Comment;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Like;
use crate::domain::post::models::NewComment;
use crate::domain::post::models::NewLike;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithComments;
use crate::domain::post::models::PostWithLikes;
use crate::post::errors::PostError;
use crate::user::models::User;

/// Port for post domain service operations.
///
/// Write operations take the already resolved author.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Publish a post as `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, author: &User, command: CreatePostCommand)
        -> Result<Post, PostError>;

    /// List all posts with their like counts.
    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError>;

    /// Retrieve a post with its like count and comments.
    ///
    /// # Errors
    /// * `PostNotFound` - Post does not exist
    async fn get_post(&self, id: PostId) -> Result<PostWithComments, PostError>;

    /// List the comments of a post.
    ///
    /// # Errors
    /// * `PostNotFound` - Post does not exist
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError>;

    /// Comment on a post as `author`.
    ///
    /// # Errors
    /// * `PostNotFound` - Post does not exist
    async fn create_comment(
        &self,
        author: &User,
        command: CreateCommentCommand,
    ) -> Result<Comment, PostError>;

    /// Like a post as `author`.
    ///
    /// # Errors
    /// * `PostNotFound` - Post does not exist
    /// * `AlreadyLiked` - Author already likes this post
    async fn like_post(&self, author: &User, post_id: PostId) -> Result<Like, PostError>;
}

/// Persistence operations for posts, comments and likes.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create_post(&self, post: NewPost) -> Result<Post, PostError>;

    async fn find_post(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError>;

    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError>;

    /// # Errors
    /// * `PostNotFound` - Referenced post does not exist
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, PostError>;

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError>;

    /// # Errors
    /// * `PostNotFound` - Referenced post does not exist
    /// * `AlreadyLiked` - Like for this post and user already stored
    async fn create_like(&self, like: NewLike) -> Result<Like, PostError>;
}
