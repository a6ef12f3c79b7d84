//! Forwarding relay library for the POGR intake API.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod relay;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
