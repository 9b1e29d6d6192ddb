use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response with a security-conscious fixed wire shape.
///
/// Every error leaves the relay as `{ "success": false, "error": "..." }`
/// with a fixed, human-readable message per error kind. Upstream and internal
/// detail stays in the logs and is never exposed verbatim to the client.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Always `false` for errors.
    pub success: bool,
    /// User-friendly error message safe for client display.
    pub error: Cow<'a, str>,
    /// HTTP status code (not serialized in JSON).
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new("Invalid request body", StatusCode::BAD_REQUEST);
    pub const INVALID_VIDEO_URL: Self = Self::new("Invalid TikTok URL", StatusCode::BAD_REQUEST);
    pub const NOT_FOUND: Self = Self::new("Not found", StatusCode::NOT_FOUND);
    pub const TOO_MANY_REQUESTS: Self = Self::new(
        "Too many requests, please try again later",
        StatusCode::TOO_MANY_REQUESTS,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self =
        Self::new("Internal server error", StatusCode::INTERNAL_SERVER_ERROR);
    pub const UPSTREAM_FAILED: Self =
        Self::new("Failed to fetch video", StatusCode::INTERNAL_SERVER_ERROR);

    /// Creates a new error response.
    #[inline]
    pub const fn new(error: &'a str, status: StatusCode) -> Self {
        Self {
            success: false,
            error: Cow::Borrowed(error),
            status,
        }
    }

    /// Creates a new error response with a custom message.
    pub fn with_error(mut self, error: impl Into<Cow<'a, str>>) -> Self {
        self.error = error.into();
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_success_and_error_only() {
        let json = serde_json::to_value(ErrorResponse::INVALID_VIDEO_URL).expect("serializes");

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid TikTok URL");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_with_error_overrides_message() {
        let response = ErrorResponse::BAD_REQUEST.with_error("custom");
        assert_eq!(response.error, "custom");
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
