/// Image upload validation and storage
///
/// Two upload paths write into the same content directory:
///
/// - the course catalog's inline upload (`add_course` with an image part),
///   which names files `course_<uuid>.<ext>` so collisions are effectively
///   impossible, and
/// - the standalone `upload_image` action, which prefixes the original
///   filename with a second-granularity timestamp.
///
/// The two paths share validation (allowed content types, 5 MiB cap) but no
/// deduplication. Writes are plain `tokio::fs` writes; a partially written
/// file on a crash mid-write is an accepted risk at this scale.

use crate::error::{ApiError, ApiResult};
use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// Content types accepted for image uploads
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum accepted image size: 5 MiB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image file extracted from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename (never used verbatim on disk)
    pub file_name: String,

    /// Declared content type
    pub content_type: String,

    /// File contents
    pub bytes: Bytes,
}

fn is_allowed_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Validates an image attached to a course
pub fn validate_course_image(image: &UploadedImage) -> ApiResult<()> {
    if !is_allowed_type(&image.content_type) {
        return Err(ApiError::Validation(
            "Invalid image type. Only JPEG, PNG, GIF, and WebP are allowed".to_string(),
        ));
    }

    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::Validation(
            "Image size must be less than 5MB".to_string(),
        ));
    }

    Ok(())
}

/// Validates an image sent through the standalone upload action
pub fn validate_image(image: &UploadedImage) -> ApiResult<()> {
    if !is_allowed_type(&image.content_type) {
        return Err(ApiError::Validation("Invalid image type".to_string()));
    }

    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::Validation("Image size too large".to_string()));
    }

    Ok(())
}

/// Strips any path components from a client filename and replaces
/// characters that don't belong in one
fn sanitize_basename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Picks a file extension from the client filename, falling back to the
/// declared content type
fn extension_for(file_name: &str, content_type: &str) -> String {
    let from_name = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext;
    }

    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
    .to_string()
}

/// Generates the on-disk filename for a course cover image
///
/// A random token makes the name collision-resistant; the client's filename
/// contributes only its extension.
pub fn course_image_filename(file_name: &str, content_type: &str) -> String {
    format!(
        "course_{}.{}",
        Uuid::new_v4().simple(),
        extension_for(file_name, content_type)
    )
}

/// Generates the on-disk filename for a standalone upload
///
/// The coarse timestamp prefix reduces collisions between uploads of the
/// same file.
pub fn upload_filename(unix_seconds: i64, file_name: &str) -> String {
    format!("{}_{}", unix_seconds, sanitize_basename(file_name))
}

/// Persists an uploaded file into the content directory
///
/// Creates the directory if it is absent.
pub async fn store(dir: &Path, filename: &str, bytes: &[u8]) -> ApiResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create upload directory: {}", e)))?;

    fs::write(dir.join(filename), bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Image upload failed: {}", e)))?;

    Ok(())
}

/// Best-effort removal of a file from the content directory
///
/// Cleanup failure never fails the surrounding operation; the row deletion
/// has already committed by the time this runs.
pub async fn remove_if_exists(dir: &Path, filename: &str) {
    let path = dir.join(filename);

    match fs::remove_file(&path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to remove image file: {}", e);
        }
    }
}
