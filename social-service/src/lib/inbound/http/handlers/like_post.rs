use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Like;
use crate::domain::post::models::PostId;
use crate::inbound::http::bearer::current_user;
use crate::inbound::http::router::AppState;

pub async fn like_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LikePostRequest>,
) -> Result<ApiSuccess<LikeData>, ApiError> {
    let author = current_user(&state, &headers).await?;

    state
        .post_service
        .like_post(&author, PostId(body.post_id))
        .await
        .map_err(ApiError::from)
        .map(|ref like| ApiSuccess::new(StatusCode::CREATED, like.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikePostRequest {
    post_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeData {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
}

impl From<&Like> for LikeData {
    fn from(like: &Like) -> Self {
        Self {
            id: like.id.0,
            post_id: like.post_id.0,
            user_id: like.user_id.0,
        }
    }
}
