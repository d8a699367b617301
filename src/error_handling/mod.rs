//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`FoiError` and the narrower kinds it wraps)
//! - Categorization of transport errors from `reqwest`
//!
//! Propagation: `Auth` and `InterfaceUnavailable` end a flow and reach the
//! caller as `Err`. `FormParse`, `Network` and `Submission` raised inside the
//! draft composer or request sender are converted into failed result records.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, network_error};
pub use types::{
    ConfigError, DirectoryError, FoiError, FormParseError, InitializationError, NetworkErrorKind,
};
