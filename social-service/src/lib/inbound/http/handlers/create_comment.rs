use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::list_comments::CommentData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Body;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::PostId;
use crate::inbound::http::bearer::current_user;
use crate::inbound::http::router::AppState;
use crate::post::errors::BodyError;

pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateCommentRequest>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let author = current_user(&state, &headers).await?;

    state
        .post_service
        .create_comment(&author, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

/// HTTP request body for commenting on a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    body: String,
    post_id: i64,
}

impl CreateCommentRequest {
    fn try_into_command(self) -> Result<CreateCommentCommand, BodyError> {
        Ok(CreateCommentCommand::new(
            Body::new(self.body)?,
            PostId(self.post_id),
        ))
    }
}
