/// The action dispatcher
///
/// Every operation of the backend is reached through `/api?action=<name>`.
/// The dispatcher is a pure mapping from action name to handler: each match
/// arm produces exactly one response value, so a request can never fall
/// through to a second handler. Unknown or missing actions get the fixed
/// error message clients key on.

use crate::app::AppState;
use crate::error::ApiError;
use axum::extract::{Query, Request, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::{admin, auth, courses, enrollment, users};

/// Query parameters shared by all actions
///
/// `user_id` stays a raw string here so that a non-numeric value reaches the
/// enrollment handlers' own validation instead of being rejected as a query
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ActionParams {
    /// The action selecting which operation runs
    pub action: Option<String>,

    /// User id for the enrollment actions
    pub user_id: Option<String>,
}

/// Routes a request to the handler named by its `action` parameter
pub async fn dispatch(
    State(state): State<AppState>,
    Query(params): Query<ActionParams>,
    req: Request,
) -> Response {
    let action = params.action.as_deref().unwrap_or("");

    let result = match action {
        // User registration & login
        "register" => auth::register(&state, req).await,
        "login" => auth::login(&state, req).await,
        "logout" => auth::logout(&state, req).await,
        "session_check" => auth::session_check(&state, req).await,

        // User management
        "get_users" => users::get_users(&state).await,
        "delete_user" => users::delete_user(&state, req).await,

        // Course management
        "add_course" => courses::add_course(&state, req).await,
        "get_courses" => courses::get_courses(&state).await,
        "delete_course" => courses::delete_course(&state, req).await,
        "upload_image" => courses::upload_image(&state, req).await,

        // Admin functionality
        "admin_login" => admin::admin_login(&state, req).await,
        "admin_stats" => admin::admin_stats(&state).await,

        // Enrollment functionality
        "get_available" => enrollment::get_available(&state, &params).await,
        "get_enrolled" => enrollment::get_enrolled(&state, &params).await,
        "enroll" => enrollment::enroll(&state, &params, req).await,

        _ => Err(ApiError::Validation(
            "Invalid or missing action parameter".to_string(),
        )),
    };

    match result {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
