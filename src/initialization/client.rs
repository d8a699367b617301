//! HTTP client initialization.
//!
//! The session owns one client for its whole lifetime so the cookie jar set
//! during login is reused by every later request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::ClientBuilder;

use crate::config::{Config, CONNECT_TIMEOUT_SECS};

/// Initializes the portal HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - the given cookie jar as cookie provider
/// - User-Agent header from the configuration
/// - total timeout from the configuration and a fixed connect timeout
/// - redirect following disabled, so callers can inspect `Location` headers
///   (a redirect is how the portal reports a created draft or a sent request)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config, jar: Arc<Jar>) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .cookie_provider(jar)
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()
}
