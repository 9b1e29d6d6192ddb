//! HTTP error handling with builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Tracing target for handler errors.
const TRACING_TARGET: &str = "ttrelay_server::handler::error";

/// The error type for HTTP handlers in the server.
///
/// Pairs an [`ErrorKind`] with optional context. The kind decides the status
/// code and the client-visible message; context is logged for operators and
/// never serialized, so internal detail cannot leak into responses.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches context information to the error.
    ///
    /// Context is written to the log when the error is serialized; it is not
    /// part of the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Converts this error into a static version by cloning all borrowed data.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
        }
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("status", &response.status)
            .field("error", &response.error);

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        write!(f, "{} ({})", response.error, response.status)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let response = self.kind.response();

        if let Some(context) = self.context {
            if response.status.is_server_error() {
                tracing::error!(
                    target: TRACING_TARGET,
                    status = response.status.as_u16(),
                    context = %context,
                    "request failed"
                );
            } else {
                tracing::debug!(
                    target: TRACING_TARGET,
                    status = response.status.as_u16(),
                    context = %context,
                    "request rejected"
                );
            }
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of the HTTP error kinds the relay can report.
///
/// Each variant corresponds to a specific HTTP status code and a fixed
/// client-visible message.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Malformed request body
    BadRequest,
    /// 400 Bad Request - Missing or unrecognized source URL
    InvalidVideoUrl,
    /// 404 Not Found - Unknown route
    NotFound,
    /// 429 Too Many Requests - Rate limit exceeded
    TooManyRequests,

    // 5xx Server Errors
    /// 500 Internal Server Error - Upstream extraction failed
    UpstreamFailed,
    /// 500 Internal Server Error - Unexpected fault
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Returns the wire response for this error kind.
    pub const fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::InvalidVideoUrl => ErrorResponse::INVALID_VIDEO_URL,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::TooManyRequests => ErrorResponse::TOO_MANY_REQUESTS,
            Self::UpstreamFailed => ErrorResponse::UPSTREAM_FAILED,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the HTTP status code for this error kind.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest | Self::InvalidVideoUrl => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamFailed | Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Creates an [`Error`] of this kind with the given context.
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            context: Some(context.into()),
        }
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        Error::new(self).into_response()
    }
}
