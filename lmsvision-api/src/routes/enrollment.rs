/// Enrollment actions
///
/// - `get_available` — courses the user has NOT enrolled in
/// - `get_enrolled` — the user's courses with enrollment status
/// - `enroll` — create a pending enrollment
///
/// For any user, available and enrolled partition the catalog: every course
/// appears in exactly one of the two listings.

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::{ApiSuccess, Message};
use crate::routes::courses::CoursesBody;
use crate::routes::dispatch::ActionParams;
use crate::routes::input::RequestInput;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use lmsvision_shared::models::course::Course;
use lmsvision_shared::models::enrollment::{EnrolledCourse, Enrollment};
use lmsvision_shared::models::user::User;
use serde::Serialize;

/// Payload for the enrolled-courses listing
#[derive(Debug, Serialize)]
struct EnrolledBody {
    courses: Vec<EnrolledCourse>,
}

/// Parses the `user_id` query parameter; zero, negative, and non-numeric
/// values are all rejected the same way
fn query_user_id(params: &ActionParams) -> ApiResult<i64> {
    params
        .user_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation("Valid user ID is required".to_string()))
}

/// `action=get_available`
pub async fn get_available(state: &AppState, params: &ActionParams) -> ApiResult<Response> {
    let user_id = query_user_id(params)?;

    let courses = Course::list_available(&state.db, user_id).await?;

    Ok(ApiSuccess::new(CoursesBody { courses }).into_response())
}

/// `action=get_enrolled`
pub async fn get_enrolled(state: &AppState, params: &ActionParams) -> ApiResult<Response> {
    let user_id = query_user_id(params)?;

    let courses = Enrollment::list_enrolled_courses(&state.db, user_id).await?;

    Ok(ApiSuccess::new(EnrolledBody { courses }).into_response())
}

/// `action=enroll`
///
/// The user id comes from the query string, the course id from the body.
/// The three checks run in a fixed order and each short-circuits: missing
/// user, then missing course, then existing enrollment. The order is part
/// of the contract — each failure has its own client-facing message. The
/// unique constraint on (user_id, course_id) backstops the duplicate check
/// when two requests race; its violation maps to the same conflict message.
pub async fn enroll(
    state: &AppState,
    params: &ActionParams,
    req: Request,
) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let user_id = params
        .user_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let course_id = input.integer("course_id").unwrap_or(0);

    if user_id <= 0 || course_id <= 0 {
        return Err(ApiError::Validation(
            "Valid user ID and course ID are required".to_string(),
        ));
    }

    if !User::exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    if !Course::exists(&state.db, course_id).await? {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    if Enrollment::exists(&state.db, user_id, course_id).await? {
        return Err(ApiError::Conflict(
            "Already enrolled in this course".to_string(),
        ));
    }

    Enrollment::create(&state.db, user_id, course_id).await?;

    Ok(Message::new("Successfully enrolled in course").into_response())
}
