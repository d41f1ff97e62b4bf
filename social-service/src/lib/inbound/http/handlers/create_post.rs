use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Body;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::inbound::http::bearer::current_user;
use crate::inbound::http::router::AppState;
use crate::post::errors::BodyError;

pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let author = current_user(&state, &headers).await?;

    state
        .post_service
        .create_post(&author, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for publishing a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    body: String,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, BodyError> {
        Ok(CreatePostCommand::new(Body::new(self.body)?))
    }
}

impl From<BodyError> for ApiError {
    fn from(err: BodyError) -> Self {
        ApiError::UnprocessableEntity(format!("Invalid body: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            body: post.body.as_str().to_string(),
            user_id: post.user_id.0,
        }
    }
}
