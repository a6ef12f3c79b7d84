//! Process lifecycle: shutdown coordination and signal handling.

pub mod shutdown;

pub use shutdown::{shutdown_signal, Shutdown};
