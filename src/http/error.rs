//! Request failure taxonomy.
//!
//! Every failure is terminal for its request and maps directly onto a
//! plain-text HTTP error. Nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors a relay handler can report to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound method was not POST.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// A required header was absent or empty.
    #[error("missing required header {0}")]
    MissingHeader(&'static str),

    /// Reading the inbound body failed before forwarding.
    #[error("failed to read request body")]
    BodyRead(#[source] axum::Error),

    /// The outbound call could not be completed (transport failure or, on
    /// the generic routes, the forward timeout).
    #[error("upstream request failed")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// Status code reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            RelayError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match &self {
            RelayError::MethodNotAllowed => "Method not allowed".to_string(),
            RelayError::MissingHeader(name) => format!("Missing required header {}", name),
            RelayError::BodyRead(_) => "Failed to read body".to_string(),
            RelayError::Upstream(_) => "Failed to forward request".to_string(),
        };
        (self.status(), message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_relay_contract() {
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::MissingHeader("pogr_client").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
