//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (portal URL, timeouts, limits)
//! - The `Config` value passed into session construction
//! - Logging option types shared with the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ConfigValidationError, Config, Credentials, LogFormat, LogLevel};
