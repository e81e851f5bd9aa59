//! Gateway error types and their HTTP rendering.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::stream::StreamError;

/// Header carrying the byte count accepted before a write failed.
pub const X_BYTES_WRITTEN: &str = "x-bytes-written";

/// Failure while serving a gateway route.
///
/// Every variant renders as `500 Internal Server Error` with the error
/// message as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Read(StreamError),

    #[error("{source}")]
    Write { written: usize, source: StreamError },

    #[error("{0}")]
    Body(#[source] axum::Error),

    #[error(transparent)]
    Decode(#[from] base64::DecodeError),
}

impl GatewayError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Read(_) => "read",
            GatewayError::Write { .. } => "write",
            GatewayError::Body(_) => "body",
            GatewayError::Decode(_) => "decode",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let mut response = Response::new(Body::from(message));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        if let GatewayError::Write { written, .. } = self {
            response
                .headers_mut()
                .insert(X_BYTES_WRITTEN, HeaderValue::from(written));
        }
        response
    }
}

/// Problems detected while registering a resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("resource prefix {0} is already registered")]
    DuplicatePrefix(String),

    #[error("resource name {0:?} contains a reserved path character")]
    InvalidName(String),
}
