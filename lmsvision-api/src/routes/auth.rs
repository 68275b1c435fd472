/// User authentication actions
///
/// - `register` — create an account with a hashed password
/// - `login` — verify credentials and open a session
/// - `logout` — revoke the session
/// - `session_check` — resolve the current session back to its user
///
/// The session token travels as `Authorization: Bearer <token>`; `login`
/// returns it as `session_id`. User rows leaving these handlers are always
/// the password-stripped [`PublicUser`].

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::{ApiSuccess, Message};
use crate::routes::bearer_token;
use crate::routes::input::RequestInput;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use lmsvision_shared::auth::password;
use lmsvision_shared::auth::session::SessionIdentity;
use lmsvision_shared::models::user::{CreateUser, PublicUser, User};
use serde::Serialize;
use validator::ValidateEmail;

/// Payload for a successful login
#[derive(Debug, Serialize)]
struct LoginBody {
    message: String,
    user: PublicUser,
    session_id: String,
}

/// Payload for a successful session check
#[derive(Debug, Serialize)]
struct UserBody {
    user: PublicUser,
}

/// `action=register`
///
/// Validation order matches what clients display: required fields, email
/// syntax, password length, then the duplicate-email check. The unique
/// constraint on `users.email` backstops the check under concurrency; its
/// violation maps to the same conflict message.
pub async fn register(state: &AppState, req: Request) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let username = input.string("username");
    let email = input.string("email");
    let password = input.raw_string("password");

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }

    if !email.validate_email() {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    password::validate_password(&password).map_err(ApiError::Validation)?;

    if User::email_exists(&state.db, &email).await? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = password::hash_password(&password)?;

    User::create(
        &state.db,
        CreateUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    Ok(Message::new("User registered successfully").into_response())
}

/// `action=login`
///
/// Unknown email and wrong password produce the identical error, so the
/// response never reveals whether an email is registered.
pub async fn login(state: &AppState, req: Request) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let email = input.string("email");
    let password = input.raw_string("password");

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;

    if !password::verify_password(&password, &user.password_hash)? {
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    let session_id = state.sessions.create(SessionIdentity::User(user.id));

    Ok(ApiSuccess::new(LoginBody {
        message: "Login successful".to_string(),
        user: user.into(),
        session_id,
    })
    .into_response())
}

/// `action=logout`
///
/// Always succeeds; revoking an already-dead session is a no-op.
pub async fn logout(state: &AppState, req: Request) -> ApiResult<Response> {
    if let Some(token) = bearer_token(req.headers()) {
        state.sessions.revoke(token);
    }

    Ok(Message::new("Successfully logged out").into_response())
}

/// `action=session_check`
///
/// Re-reads the user row so the client sees current data, not what was true
/// at login. A session whose user has since been deleted is revoked and
/// reported as not logged in.
pub async fn session_check(state: &AppState, req: Request) -> ApiResult<Response> {
    let not_logged_in = || ApiError::Auth("Not logged in".to_string());

    let token = bearer_token(req.headers()).ok_or_else(not_logged_in)?;
    let identity = state.sessions.resolve(token).ok_or_else(not_logged_in)?;
    let user_id = identity.user_id().ok_or_else(not_logged_in)?;

    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(ApiSuccess::new(UserBody { user: user.into() }).into_response()),
        None => {
            state.sessions.revoke(token);
            Err(not_logged_in())
        }
    }
}
