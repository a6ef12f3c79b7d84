//! HTTP surface of the relay.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, one handler per route shape)
//!     → relay::headers (validate required headers)
//!     → relay::upstream (forward to <base><path>)
//!     → error.rs (terminal failures to plain-text responses)
//! ```

pub mod error;
pub mod server;

pub use error::RelayError;
pub use server::HttpServer;
