/// User management actions
///
/// - `get_users` — list all accounts (password hashes stripped)
/// - `delete_user` — remove an account and its enrollments

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::{ApiSuccess, Message};
use crate::routes::input::RequestInput;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use lmsvision_shared::models::user::{PublicUser, User};
use serde::Serialize;

/// Payload for the user listing
#[derive(Debug, Serialize)]
struct UsersBody {
    users: Vec<PublicUser>,
}

/// `action=get_users`
pub async fn get_users(state: &AppState) -> ApiResult<Response> {
    let users = User::list_public(&state.db).await?;

    Ok(ApiSuccess::new(UsersBody { users }).into_response())
}

/// `action=delete_user`
///
/// The user's enrollment rows go first, then the user, in one transaction.
pub async fn delete_user(state: &AppState, req: Request) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let id = input
        .integer("id")
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation("Valid user ID is required".to_string()))?;

    if User::delete(&state.db, id).await? {
        Ok(Message::new("User deleted successfully").into_response())
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}
