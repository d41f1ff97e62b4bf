use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::list_comments::CommentData;
use super::list_posts::PostWithLikesData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithComments;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<PostWithCommentsData>, ApiError> {
    state
        .post_service
        .get_post(PostId(post_id))
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithCommentsData {
    pub post: PostWithLikesData,
    pub comments: Vec<CommentData>,
}

impl From<&PostWithComments> for PostWithCommentsData {
    fn from(entry: &PostWithComments) -> Self {
        Self {
            post: (&entry.post).into(),
            comments: entry.comments.iter().map(CommentData::from).collect(),
        }
    }
}
