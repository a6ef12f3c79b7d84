//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (fixed production upstream, port 8080)
//!     → loader.rs (optional TOML file overlay)
//!     → environment (PORT)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the relay runs with no config file at all
//! - `PORT` is the only environment override, for container deployments

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, RelayConfig, UpstreamConfig};
