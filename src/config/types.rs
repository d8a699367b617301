//! Configuration types.
//!
//! `Config` is the explicit configuration value handed to the session manager.
//! Nothing deeper in the crate reads the process environment.

use std::fmt;

use clap::ValueEnum;
use url::Url;

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_DOMAIN, ENV_EMAIL,
    ENV_PASSWORD,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Portal account credentials.
///
/// Supplied by the caller and never persisted. The `Debug` output hides the
/// password so a logged `Config` cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"******")
            .finish()
    }
}

/// A configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected instead
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration.
///
/// # Examples
///
/// ```no_run
/// use asktheeu_client::{Config, Credentials};
///
/// let config = Config {
///     base_url: "https://www.asktheeu.org".to_string(),
///     timeout_seconds: 30,
///     ..Config::new(Credentials::new("me@example.org", "secret"))
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Portal root, without a trailing slash
    pub base_url: String,

    /// Account used to sign in
    pub credentials: Credentials,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Config {
    /// Creates a configuration for the default portal.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Builds a configuration from `ASKTHEEU_EMAIL`, `ASKTHEEU_PASSWORD` and the
    /// optional `ASKTHEEU_DOMAIN` override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVariable` when a credential is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = required_env(ENV_EMAIL)?;
        let password = required_env(ENV_PASSWORD)?;
        let mut config = Self::new(Credentials::new(email, password));
        if let Some(domain) = std::env::var(ENV_DOMAIN).ok().filter(|v| !v.trim().is_empty()) {
            config.base_url = domain.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Parsed portal root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` does not parse.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.base_url.trim_end_matches('/')).map_err(|e| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    /// Checks the configuration before a session is created.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            Ok(url) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!(
                        "must be an http(s) URL with a host, got scheme '{}'",
                        url.scheme()
                    ),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "base_url",
                    message: format!("'{}' is not a valid URL ({})", self.base_url, e),
                })
            }
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.credentials.email.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "email",
                message: format!("must not be empty (set {})", ENV_EMAIL),
            });
        }
        if self.credentials.password.is_empty() {
            return Err(ConfigValidationError {
                field: "password",
                message: format!("must not be empty (set {})", ENV_PASSWORD),
            });
        }
        Ok(())
    }
}

fn required_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVariable { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config::new(Credentials::new("me@example.org", "hunter2"))
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let rendered = format!("{:?}", sample_config());
        assert!(rendered.contains("me@example.org"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(sample_config().validate().is_ok());
        assert_eq!(sample_config().timeout_seconds, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = sample_config();
        config.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "timeout_seconds");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = sample_config();
        config.base_url = "ftp://www.asktheeu.org".to_string();
        assert_eq!(config.validate().unwrap_err().field, "base_url");

        config.base_url = "not a url".to_string();
        assert_eq!(config.validate().unwrap_err().field, "base_url");
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let mut config = sample_config();
        config.credentials.password.clear();
        assert_eq!(config.validate().unwrap_err().field, "password");

        let mut config = sample_config();
        config.credentials.email = "  ".to_string();
        assert_eq!(config.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_parsed_base_url_strips_trailing_slash() {
        let mut config = sample_config();
        config.base_url = "https://example.org/".to_string();
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.as_str(), "https://example.org/");
        assert_eq!(url.host_str(), Some("example.org"));
    }
}
