/// Error handling for the API server
///
/// One unified error type maps every failure to the response shape clients
/// expect: `{"status": "error", "message": "..."}`, with an HTTP status code
/// matching the error kind. Handlers return `Result<T, ApiError>` and never
/// let a fault propagate unhandled.
///
/// # Example
///
/// ```
/// use lmsvision_api::error::{ApiError, ApiResult};
///
/// fn lookup(id: i64) -> ApiResult<i64> {
///     if id <= 0 {
///         return Err(ApiError::Validation("Valid course ID is required".to_string()));
///     }
///     Ok(id)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input (400)
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or no session (401)
    #[error("{0}")]
    Auth(String),

    /// Referenced entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (409)
    #[error("{0}")]
    Conflict(String),

    /// Database or filesystem operation failed (500)
    #[error("{0}")]
    Internal(String),
}

/// Error response body
///
/// `status` is always the literal `"error"`; success responses carry
/// `"success"` via [`crate::response::ApiSuccess`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always "error"
    pub status: String,

    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                // Internal details are logged, not exposed to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            status: "error".to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-constraint violations are the authoritative conflict signal: the
/// pre-insert SELECT checks give ordered error messages, but under
/// concurrent requests the constraint is what actually holds, so its
/// violation maps to the same conflict the check would have produced.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint == "users_email_key" {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    if constraint == "course_progress_user_id_course_id_key" {
                        return ApiError::Conflict(
                            "Already enrolled in this course".to_string(),
                        );
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<lmsvision_shared::auth::password::PasswordError> for ApiError {
    fn from(err: lmsvision_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Validation("All fields are required".to_string());
        assert_eq!(err.to_string(), "All fields are required");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            status: "error".to_string(),
            message: "Invalid or missing action parameter".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Invalid or missing action parameter");
    }
}
