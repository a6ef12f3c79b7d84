//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! validated inbound request
//!     → headers.rs (required-header extraction)
//!     → upstream.rs (outbound POST to <base><path>)
//!     → relay_response (status + body streamed back verbatim)
//! ```
//!
//! # Design Decisions
//! - Two distinct forward paths: the init route buffers the whole body in
//!   memory before forwarding, the generic routes stream it straight through
//! - Upstream response headers are not copied; only status and body relay
//! - No retries: every failure is terminal for the request

pub mod headers;
pub mod upstream;

pub use headers::{require_header, INTAKE_SESSION_ID, POGR_BUILD, POGR_CLIENT};
pub use upstream::{relay_response, UpstreamClient};
