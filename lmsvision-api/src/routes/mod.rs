/// Action handlers and the dispatcher
///
/// The backend exposes a single `/api` endpoint; `dispatch` maps the
/// `action` query parameter to exactly one handler. Handlers are organized
/// by resource:
///
/// - `auth`: register, login, logout, session_check
/// - `users`: get_users, delete_user
/// - `courses`: add_course, get_courses, delete_course, upload_image
/// - `admin`: admin_login, admin_stats
/// - `enrollment`: get_available, get_enrolled, enroll
/// - `input`: request body normalization (form / JSON / multipart)
/// - `health`: liveness endpoint outside the action switch

pub mod admin;
pub mod auth;
pub mod courses;
pub mod dispatch;
pub mod enrollment;
pub mod health;
pub mod input;
pub mod users;

use axum::http::{header, HeaderMap};

/// Extracts the session token from an `Authorization: Bearer` header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
