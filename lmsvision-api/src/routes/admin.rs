/// Admin actions
///
/// - `admin_login` — authenticate against the seeded admin accounts
/// - `admin_stats` — dashboard counters
///
/// Admin passwords are Argon2id hashes verified through the same password
/// module as user logins; there is no plaintext comparison anywhere.

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::ApiSuccess;
use crate::routes::input::RequestInput;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use lmsvision_shared::auth::password;
use lmsvision_shared::auth::session::SessionIdentity;
use lmsvision_shared::models::admin::{Admin, PublicAdmin};
use lmsvision_shared::models::course::Course;
use lmsvision_shared::models::enrollment::{Enrollment, EnrollmentStatus};
use lmsvision_shared::models::user::User;
use serde::Serialize;

/// Payload for a successful admin login
#[derive(Debug, Serialize)]
struct AdminLoginBody {
    message: String,
    admin: PublicAdmin,
    session_id: String,
}

/// Dashboard counters
#[derive(Debug, Serialize)]
struct Stats {
    users: i64,
    courses: i64,
    completed: i64,
    pending: i64,
}

/// Payload for the stats action
#[derive(Debug, Serialize)]
struct StatsBody {
    data: Stats,
}

/// `action=admin_login`
///
/// Unknown email and wrong password produce the identical error.
pub async fn admin_login(state: &AppState, req: Request) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let email = input.string("email");
    let pass = input.raw_string("password");

    if email.is_empty() || pass.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let admin = Admin::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid admin credentials".to_string()))?;

    if !password::verify_password(&pass, &admin.password_hash)? {
        return Err(ApiError::Auth("Invalid admin credentials".to_string()));
    }

    let session_id = state.sessions.create(SessionIdentity::Admin(admin.id));

    Ok(ApiSuccess::new(AdminLoginBody {
        message: "Admin login successful".to_string(),
        admin: admin.into(),
        session_id,
    })
    .into_response())
}

/// `action=admin_stats`
pub async fn admin_stats(state: &AppState) -> ApiResult<Response> {
    let users = User::count(&state.db).await?;
    let courses = Course::count(&state.db).await?;
    let completed =
        Enrollment::count_by_status(&state.db, EnrollmentStatus::Completed).await?;
    let pending = Enrollment::count_by_status(&state.db, EnrollmentStatus::Pending).await?;

    Ok(ApiSuccess::new(StatsBody {
        data: Stats {
            users,
            courses,
            completed,
            pending,
        },
    })
    .into_response())
}
