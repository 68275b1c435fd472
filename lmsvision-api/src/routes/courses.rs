/// Course catalog actions
///
/// - `add_course` — create a course, optionally with an inline cover image
/// - `get_courses` — list the whole catalog
/// - `delete_course` — remove a course, its enrollments, and its image file
/// - `upload_image` — the standalone upload path
///
/// `add_course` accepts either a multipart form (when an image rides along)
/// or a plain form/JSON body.

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::response::{ApiSuccess, Message};
use crate::routes::input::{MultipartInput, RequestInput};
use crate::uploads;
use axum::extract::Request;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use lmsvision_shared::models::course::{Course, CreateCourse};
use serde::Serialize;

/// Payload for course listings
#[derive(Debug, Serialize)]
pub(crate) struct CoursesBody {
    pub courses: Vec<Course>,
}

/// Payload for the standalone upload action
#[derive(Debug, Serialize)]
struct ImageUrlBody {
    image_url: String,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// `action=add_course`
///
/// The image is validated and written before the row insert; the row then
/// records the generated filename, never the client's. A validation failure
/// on the image leaves no file behind because nothing has been written yet.
pub async fn add_course(state: &AppState, req: Request) -> ApiResult<Response> {
    let (title, description, tags, image) = if is_multipart(&req) {
        let input = MultipartInput::read(req).await?;
        (
            input.string("title"),
            input.string("description"),
            input.string("tags"),
            input.image,
        )
    } else {
        let input = RequestInput::read(req).await?;
        (
            input.string("title"),
            input.string("description"),
            input.string("tags"),
            None,
        )
    };

    if title.is_empty() || description.is_empty() {
        return Err(ApiError::Validation(
            "Title and description are required".to_string(),
        ));
    }

    let image_name = match image {
        Some(img) => {
            uploads::validate_course_image(&img)?;
            let name = uploads::course_image_filename(&img.file_name, &img.content_type);
            uploads::store(state.uploads_dir(), &name, &img.bytes).await?;
            Some(name)
        }
        None => None,
    };

    Course::create(
        &state.db,
        CreateCourse {
            title,
            description,
            tags,
            image: image_name,
        },
    )
    .await?;

    Ok(Message::new("Course added successfully").into_response())
}

/// `action=get_courses`
pub async fn get_courses(state: &AppState) -> ApiResult<Response> {
    let courses = Course::list(&state.db).await?;

    Ok(ApiSuccess::new(CoursesBody { courses }).into_response())
}

/// `action=delete_course`
///
/// The image filename is read before the row goes away. File removal runs
/// after the delete commits and is best-effort: a failed unlink is logged
/// but the deletion has already succeeded and is reported as such.
pub async fn delete_course(state: &AppState, req: Request) -> ApiResult<Response> {
    let input = RequestInput::read(req).await?;

    let id = input
        .integer("id")
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation("Valid course ID is required".to_string()))?;

    let course = Course::find_by_id(&state.db, id).await?;

    if !Course::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    if let Some(image) = course.and_then(|c| c.image) {
        uploads::remove_if_exists(state.uploads_dir(), &image).await;
    }

    Ok(Message::new("Course deleted successfully").into_response())
}

/// `action=upload_image`
///
/// Independent of `add_course`'s inline path; writes into the same content
/// directory and returns the relative URL the file is served under.
pub async fn upload_image(state: &AppState, req: Request) -> ApiResult<Response> {
    if !is_multipart(&req) {
        return Err(ApiError::Validation("No image file provided".to_string()));
    }

    let input = MultipartInput::read(req).await?;

    let image = input
        .image
        .ok_or_else(|| ApiError::Validation("No image file provided".to_string()))?;

    uploads::validate_image(&image)?;

    let name = uploads::upload_filename(Utc::now().timestamp(), &image.file_name);
    uploads::store(state.uploads_dir(), &name, &image.bytes).await?;

    Ok(ApiSuccess::new(ImageUrlBody {
        image_url: format!("uploads/{}", name),
    })
    .into_response())
}
