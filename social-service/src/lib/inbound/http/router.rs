use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_email::confirm_email;
use super::handlers::create_comment::create_comment;
use super::handlers::create_post::create_post;
use super::handlers::get_post::get_post;
use super::handlers::like_post::like_post;
use super::handlers::list_comments::list_comments;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::register::register;
use crate::post::ports::PostServicePort;
use crate::telemetry::new_request_id;
use crate::user::ports::UserServicePort;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
    };

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/confirm/:token", get(confirm_email))
        .route("/token", post(login));

    // Write routes resolve the caller themselves through the bearer guard.
    let post_routes = Router::new()
        .route("/post", post(create_post))
        .route("/posts", get(list_posts))
        .route("/post/:post_id", get(get_post))
        .route("/post/:post_id/comments", get(list_comments))
        .route("/comment", post(create_comment))
        .route("/like", post(like_post));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(new_request_id);

            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(post_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
