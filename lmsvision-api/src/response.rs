/// The uniform success envelope
///
/// Every success response has the shape `{"status": "success", ...payload}`.
/// The payload struct is flattened into the envelope, so handlers define a
/// small typed body per action and wrap it here.
///
/// # Example
///
/// ```
/// use lmsvision_api::response::{ApiSuccess, Message};
///
/// let body = serde_json::to_value(Message::new("Course added successfully")).unwrap();
/// assert_eq!(body["status"], "success");
/// assert_eq!(body["message"], "Course added successfully");
/// # let _ = ApiSuccess::new(());
/// ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success envelope wrapping an action's payload
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T: Serialize> {
    /// Always "success"
    pub status: &'static str,

    /// Action-specific payload, flattened into the envelope
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> ApiSuccess<T> {
    /// Wraps a payload in the success envelope
    pub fn new(body: T) -> Self {
        Self {
            status: "success",
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Payload for actions whose success body is just a message
#[derive(Debug, Serialize)]
pub struct Message {
    /// Human-readable confirmation
    pub message: String,
}

impl Message {
    /// Builds a message-only success envelope
    pub fn new(message: impl Into<String>) -> ApiSuccess<Message> {
        ApiSuccess::new(Message {
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: i64,
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let json = serde_json::to_value(ApiSuccess::new(Payload { count: 3 })).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn test_message_envelope() {
        let json = serde_json::to_value(Message::new("Login successful")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Login successful");
    }
}
