//! Required-header validation.
//!
//! Header names are matched case-insensitively; the wire names used by POGR
//! clients are the uppercase forms (`POGR_CLIENT`, `POGR_BUILD`,
//! `INTAKE_SESSION_ID`).

use axum::http::{HeaderMap, HeaderValue};

use crate::http::error::RelayError;

/// Client identifier header, required on `/init`.
pub const POGR_CLIENT: &str = "pogr_client";

/// Build identifier header, required on `/init`.
pub const POGR_BUILD: &str = "pogr_build";

/// Session header, required on every generic intake route.
pub const INTAKE_SESSION_ID: &str = "intake_session_id";

/// Extract a required header, rejecting absent or empty values.
pub fn require_header(headers: &HeaderMap, name: &'static str) -> Result<HeaderValue, RelayError> {
    match headers.get(name) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(RelayError::MissingHeader(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_present_header() {
        let mut headers = HeaderMap::new();
        headers.insert("pogr_client", HeaderValue::from_static("game-client"));
        let value = require_header(&headers, POGR_CLIENT).unwrap();
        assert_eq!(value, "game-client");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        // Clients send the uppercase wire form; HeaderName normalizes it.
        let name = axum::http::HeaderName::from_bytes(b"INTAKE_SESSION_ID").unwrap();
        headers.insert(name, HeaderValue::from_static("abc123"));
        assert!(require_header(&headers, INTAKE_SESSION_ID).is_ok());
    }

    #[test]
    fn rejects_absent_header() {
        let headers = HeaderMap::new();
        let err = require_header(&headers, POGR_BUILD).unwrap_err();
        assert!(matches!(err, RelayError::MissingHeader("pogr_build")));
    }

    #[test]
    fn rejects_empty_header() {
        let mut headers = HeaderMap::new();
        headers.insert("pogr_build", HeaderValue::from_static(""));
        let err = require_header(&headers, POGR_BUILD).unwrap_err();
        assert!(matches!(err, RelayError::MissingHeader(_)));
    }
}
