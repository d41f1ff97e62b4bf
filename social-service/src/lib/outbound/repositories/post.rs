use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::post::models::Body;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::Like;
use crate::domain::post::models::LikeId;
use crate::domain::post::models::NewComment;
use crate::domain::post::models::NewLike;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithLikes;
use crate::domain::post::ports::PostRepository;
use crate::post::errors::PostError;
use crate::user::models::UserId;

const SELECT_POSTS_WITH_LIKES: &str = r#"
    SELECT posts.id, posts.body, posts.user_id, COUNT(likes.id) AS likes
    FROM posts
    LEFT JOIN likes ON likes.post_id = posts.id
"#;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    body: String,
    user_id: i64,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            body: Body::new(row.body)?,
            user_id: UserId(row.user_id),
        })
    }
}

#[derive(Debug, FromRow)]
struct PostWithLikesRow {
    #[sqlx(flatten)]
    post: PostRow,
    likes: i64,
}

impl TryFrom<PostWithLikesRow> for PostWithLikes {
    type Error = PostError;

    fn try_from(row: PostWithLikesRow) -> Result<Self, Self::Error> {
        Ok(PostWithLikes {
            post: row.post.try_into()?,
            likes: row.likes,
        })
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    body: String,
    post_id: i64,
    user_id: i64,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PostError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId(row.id),
            body: Body::new(row.body)?,
            post_id: PostId(row.post_id),
            user_id: UserId(row.user_id),
        })
    }
}

#[derive(Debug, FromRow)]
struct LikeRow {
    id: i64,
    post_id: i64,
    user_id: i64,
}

fn order_clause(sorting: PostSorting) -> &'static str {
    match sorting {
        PostSorting::New => "ORDER BY posts.id DESC",
        PostSorting::Old => "ORDER BY posts.id ASC",
        PostSorting::MostLikes => "ORDER BY likes DESC, posts.id DESC",
    }
}

/// Map a write failure on a row referencing `post_id`.
fn map_reference_error(e: sqlx::Error, post_id: PostId) -> PostError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation()
            && db_err
                .constraint()
                .is_some_and(|name| name.ends_with("_post_id_fkey"))
        {
            return PostError::PostNotFound(post_id);
        }
        if db_err.is_unique_violation()
            && db_err.constraint() == Some("likes_post_id_user_id_key")
        {
            return PostError::AlreadyLiked(post_id);
        }
    }
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, post: NewPost) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (body, user_id)
            VALUES ($1, $2)
            RETURNING id, body, user_id
            "#,
        )
        .bind(post.body.as_str())
        .bind(post.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find_post(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError> {
        let query = format!(
            "{} WHERE posts.id = $1 GROUP BY posts.id",
            SELECT_POSTS_WITH_LIKES
        );

        let row = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.map(PostWithLikes::try_from).transpose()
    }

    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError> {
        let query = format!(
            "{} GROUP BY posts.id {}",
            SELECT_POSTS_WITH_LIKES,
            order_clause(sorting)
        );

        let rows = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PostWithLikes::try_from).collect()
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, PostError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (body, post_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, body, post_id, user_id
            "#,
        )
        .bind(comment.body.as_str())
        .bind(comment.post_id.0)
        .bind(comment.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, comment.post_id))?;

        row.try_into()
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, body, post_id, user_id
            FROM comments
            WHERE post_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(post_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn create_like(&self, like: NewLike) -> Result<Like, PostError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO likes (post_id, user_id)
            VALUES ($1, $2)
            RETURNING id, post_id, user_id
            "#,
        )
        .bind(like.post_id.0)
        .bind(like.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, like.post_id))?;

        Ok(Like {
            id: LikeId(row.id),
            post_id: PostId(row.post_id),
            user_id: UserId(row.user_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause() {
        assert_eq!(order_clause(PostSorting::New), "ORDER BY posts.id DESC");
        assert_eq!(order_clause(PostSorting::Old), "ORDER BY posts.id ASC");
        assert_eq!(
            order_clause(PostSorting::MostLikes),
            "ORDER BY likes DESC, posts.id DESC"
        );
    }
}
