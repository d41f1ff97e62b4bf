use axum::http::header;
use axum::http::HeaderMap;

use super::handlers::ApiError;
use super::router::AppState;
use crate::user::models::User;

/// Resolve the user behind the request's bearer access token.
///
/// Protected handlers call this before doing any work.
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = extract_bearer_token(headers)?;

    state
        .user_service
        .current_user(token)
        .await
        .map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token rejected");
            ApiError::from(e)
        })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(ApiError::Unauthorized("Not authenticated".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Basic abc")),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Bearer")),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
