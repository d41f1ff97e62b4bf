use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithLikes;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<ApiSuccess<Vec<PostWithLikesData>>, ApiError> {
    state
        .post_service
        .list_posts(query.sorting)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(PostWithLikesData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    sorting: PostSorting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithLikesData {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub likes: i64,
}

impl From<&PostWithLikes> for PostWithLikesData {
    fn from(entry: &PostWithLikes) -> Self {
        Self {
            id: entry.post.id.0,
            body: entry.post.body.as_str().to_string(),
            user_id: entry.post.user_id.0,
            likes: entry.likes,
        }
    }
}
