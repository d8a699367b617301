//! Configuration constants.
//!
//! Defaults for the portal location, network timeouts and diagnostic limits.

/// Portal used when no base URL override is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.asktheeu.org";

/// Per-request timeout in seconds.
///
/// Portal pages are server-rendered and occasionally slow after a POST, so the
/// default is generous. It is still finite: a hung request surfaces as a
/// network error instead of blocking the flow forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// TCP connection timeout in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome browser; the portal serves the same markup to it as
/// to an interactive user. Override with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

// Redirect handling
/// Maximum number of redirect hops followed manually after a form POST
pub const MAX_REDIRECT_HOPS: usize = 10;

// Diagnostics
/// Maximum number of characters of a response page quoted in a debug diagnostic
pub const MAX_EXCERPT_CHARS: usize = 500;
/// Maximum error message length in characters (2000 chars)
/// Longer messages are truncated with a note about the original length
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

// Environment variables read by `Config::from_env`
pub const ENV_EMAIL: &str = "ASKTHEEU_EMAIL";
pub const ENV_PASSWORD: &str = "ASKTHEEU_PASSWORD";
pub const ENV_DOMAIN: &str = "ASKTHEEU_DOMAIN";
