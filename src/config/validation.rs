//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, bind address parses)
//! - Check the upstream base URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("unsupported scheme: {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("not a valid URL: {}", e),
        }),
    }

    if config.upstream.forward_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.forward_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
