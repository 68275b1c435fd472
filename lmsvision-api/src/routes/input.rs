/// Request body normalization
///
/// Clients send bodies as form-encoded pairs, JSON objects, or (for the
/// upload paths) multipart forms. [`RequestInput`] folds the first two into
/// one field map; form parsing wins for form content types and is the
/// fallback when a JSON parse fails, so form fields take precedence whenever
/// both interpretations could apply. String accessors trim surrounding
/// whitespace; the integer accessor accepts JSON numbers and numeric
/// strings alike (form values always arrive as strings).
///
/// # Example
///
/// ```
/// use lmsvision_api::routes::input::RequestInput;
///
/// let input = RequestInput::parse("application/json", br#"{"id": "7", "title": " T "}"#);
/// assert_eq!(input.integer("id"), Some(7));
/// assert_eq!(input.string("title"), "T");
/// assert_eq!(input.string("missing"), "");
/// ```

use crate::error::{ApiError, ApiResult};
use crate::uploads::UploadedImage;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Cap on non-multipart bodies; these carry only small field sets
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Normalized request fields from a form-encoded or JSON body
#[derive(Debug, Default)]
pub struct RequestInput {
    fields: Map<String, Value>,
}

impl RequestInput {
    /// Reads and parses the request body
    pub async fn read(req: Request) -> ApiResult<Self> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| ApiError::Validation("Failed to read request body".to_string()))?;

        Ok(Self::parse(&content_type, &bytes))
    }

    /// Parses a raw body according to its content type
    ///
    /// An unparseable body yields an empty field map rather than an error;
    /// the per-action required-field checks produce the meaningful message.
    pub fn parse(content_type: &str, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }

        let fields = if content_type.starts_with("application/x-www-form-urlencoded") {
            parse_form(bytes).or_else(|| parse_json(bytes))
        } else {
            parse_json(bytes).or_else(|| parse_form(bytes))
        };

        Self {
            fields: fields.unwrap_or_default(),
        }
    }

    /// Returns a field as a trimmed string, empty if absent or non-scalar
    pub fn string(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Returns a field untrimmed; passwords keep their whitespace
    pub fn raw_string(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Returns a field as an integer, accepting numbers and numeric strings
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn parse_json(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn parse_form(bytes: &[u8]) -> Option<Map<String, Value>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes).ok()?;

    Some(
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
    )
}

/// Text fields and the optional image part of a multipart form
#[derive(Debug, Default)]
pub struct MultipartInput {
    fields: HashMap<String, String>,

    /// The part named `image`, if one was sent
    pub image: Option<UploadedImage>,
}

impl MultipartInput {
    /// Reads a multipart request into text fields plus the image part
    pub async fn read(req: Request) -> ApiResult<Self> {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|_| ApiError::Validation("Expected multipart form data".to_string()))?;

        let mut input = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiError::Validation("Malformed multipart form data".to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image" {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|_| {
                    ApiError::Validation("Failed to read uploaded file".to_string())
                })?;

                input.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes,
                });
            } else {
                let text = field.text().await.map_err(|_| {
                    ApiError::Validation("Malformed multipart form data".to_string())
                })?;
                input.fields.insert(name, text);
            }
        }

        Ok(input)
    }

    /// Returns a text field, trimmed, empty if absent
    pub fn string(&self, key: &str) -> String {
        self.fields
            .get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let input = RequestInput::parse(
            "application/json",
            br#"{"email": " a@x.com ", "password": " p "}"#,
        );

        assert_eq!(input.string("email"), "a@x.com");
        // Passwords keep surrounding whitespace
        assert_eq!(input.raw_string("password"), " p ");
    }

    #[test]
    fn test_parse_form_encoded() {
        let input = RequestInput::parse(
            "application/x-www-form-urlencoded",
            b"username=alice&email=a%40x.com&password=secret1",
        );

        assert_eq!(input.string("username"), "alice");
        assert_eq!(input.string("email"), "a@x.com");
        assert_eq!(input.string("password"), "secret1");
    }

    #[test]
    fn test_form_wins_for_form_content_type() {
        // This body parses both ways; the declared type picks form
        let input = RequestInput::parse("application/x-www-form-urlencoded", b"id=5");
        assert_eq!(input.integer("id"), Some(5));
    }

    #[test]
    fn test_json_fallback_to_form() {
        // No content type and not JSON: form parsing still recovers it
        let input = RequestInput::parse("", b"course_id=9");
        assert_eq!(input.integer("course_id"), Some(9));
    }

    #[test]
    fn test_integer_accepts_numbers_and_strings() {
        let input = RequestInput::parse("application/json", br#"{"a": 3, "b": "4", "c": "x"}"#);

        assert_eq!(input.integer("a"), Some(3));
        assert_eq!(input.integer("b"), Some(4));
        assert_eq!(input.integer("c"), None);
        assert_eq!(input.integer("missing"), None);
    }

    #[test]
    fn test_empty_and_garbage_bodies() {
        let empty = RequestInput::parse("application/json", b"");
        assert_eq!(empty.string("anything"), "");

        let garbage = RequestInput::parse("application/json", b"\x00\xffnot json");
        assert_eq!(garbage.integer("id"), None);
    }

    #[test]
    fn test_json_array_is_not_an_object() {
        let input = RequestInput::parse("application/json", b"[1, 2, 3]");
        assert_eq!(input.string("0"), "");
    }
}
