//! Error categorization.
//!
//! Turns `reqwest` failures into `FoiError::Network` values.

use super::types::{FoiError, NetworkErrorKind};

/// Categorizes a `reqwest::Error` into a `NetworkErrorKind`.
///
/// Timeouts are checked first: a timed-out request can also report itself as
/// a request or body error, and the timeout is the more useful diagnosis.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> NetworkErrorKind {
    if error.is_timeout() {
        NetworkErrorKind::Timeout
    } else if error.is_builder() {
        NetworkErrorKind::Builder
    } else if error.is_redirect() {
        NetworkErrorKind::Redirect
    } else if error.is_connect() {
        NetworkErrorKind::Connect
    } else if error.is_request() {
        NetworkErrorKind::Request
    } else if error.is_body() {
        NetworkErrorKind::Body
    } else if error.is_decode() {
        NetworkErrorKind::Decode
    } else {
        NetworkErrorKind::Other
    }
}

/// Wraps a `reqwest::Error` raised while talking to `url`.
///
/// The message is the error's own description without the URL, which is
/// carried separately.
pub fn network_error(url: &str, error: reqwest::Error) -> FoiError {
    let kind = categorize_reqwest_error(&error);
    FoiError::Network {
        kind,
        url: url.to_string(),
        message: error.without_url().to_string(),
    }
}
