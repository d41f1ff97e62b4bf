use std::sync::Arc;

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
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;
use crate::user::models::User;

/// Domain service implementation for posts, comments and likes.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn require_post(&self, id: PostId) -> Result<PostWithLikes, PostError> {
        self.repository
            .find_post(id)
            .await?
            .ok_or(PostError::PostNotFound(id))
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author: &User,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = self
            .repository
            .create_post(NewPost {
                body: command.body,
                user_id: author.id,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %author.id, "Post created");

        Ok(post)
    }

    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError> {
        tracing::debug!(?sorting, "Listing posts");
        self.repository.list_posts(sorting).await
    }

    async fn get_post(&self, id: PostId) -> Result<PostWithComments, PostError> {
        let post = self.require_post(id).await?;
        let comments = self.repository.list_comments(id).await?;

        Ok(PostWithComments { post, comments })
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        self.require_post(post_id).await?;
        self.repository.list_comments(post_id).await
    }

    async fn create_comment(
        &self,
        author: &User,
        command: CreateCommentCommand,
    ) -> Result<Comment, PostError> {
        self.require_post(command.post_id).await?;

        let comment = self
            .repository
            .create_comment(NewComment {
                body: command.body,
                post_id: command.post_id,
                user_id: author.id,
            })
            .await?;

        tracing::info!(post_id = %comment.post_id, user_id = %author.id, "Comment created");

        Ok(comment)
    }

    async fn like_post(&self, author: &User, post_id: PostId) -> Result<Like, PostError> {
        self.require_post(post_id).await?;

        let like = self
            .repository
            .create_like(NewLike {
                post_id,
                user_id: author.id,
            })
            .await?;

        tracing::info!(post_id = %post_id, user_id = %author.id, "Post liked");

        Ok(like)
    }
}
