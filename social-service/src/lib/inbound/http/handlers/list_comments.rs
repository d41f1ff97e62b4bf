use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Comment;
use crate::domain::post::models::PostId;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    state
        .post_service
        .list_comments(PostId(post_id))
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub body: String,
    pub post_id: i64,
    pub user_id: i64,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.0,
            body: comment.body.as_str().to_string(),
            post_id: comment.post_id.0,
            user_id: comment.user_id.0,
        }
    }
}
