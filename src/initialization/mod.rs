//! Application initialization.
//!
//! - HTTP client construction (cookie jar, timeouts, no automatic redirects)
//! - Logger setup

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
