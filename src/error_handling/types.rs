//! Error type definitions.
//!
//! `FoiError` carries the failure kinds a portal flow can end in. Login and
//! interface probing return it directly; the draft composer and request sender
//! fold it into their result records instead.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Configuration problems detected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {name} is not set")]
    MissingVariable { name: &'static str },

    /// The configured portal URL does not parse.
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    /// A field failed `Config::validate`.
    #[error("invalid configuration: {field} {message}")]
    Invalid { field: &'static str, message: String },
}

/// The request-creation page did not have the shape we expect.
///
/// Any of these means the portal markup drifted away from both known
/// interfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormParseError {
    #[error("request form not found on the page")]
    FormNotFound,

    #[error("anti-forgery token (authenticity_token) not found in the form")]
    MissingToken,

    #[error("form field for {field} not found")]
    MissingField { field: &'static str },
}

/// The public body directory could not be loaded.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("failed to open public body directory {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed public body directory: {0}")]
    Csv(#[from] csv::Error),

    #[error("public body directory has no {column} column")]
    MissingColumn { column: &'static str },
}

/// Transport-level failure categories.
///
/// Mirrors the flags `reqwest::Error` exposes so diagnostics can say what kind
/// of failure happened without quoting the whole error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Redirect,
    Request,
    Body,
    Decode,
    Builder,
    Other,
}

impl NetworkErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorKind::Timeout => "HTTP request timeout error",
            NetworkErrorKind::Connect => "HTTP request connect error",
            NetworkErrorKind::Redirect => "HTTP request redirect error",
            NetworkErrorKind::Request => "HTTP request error",
            NetworkErrorKind::Body => "HTTP request body error",
            NetworkErrorKind::Decode => "HTTP request decode error",
            NetworkErrorKind::Builder => "HTTP request builder error",
            NetworkErrorKind::Other => "HTTP request other error",
        }
    }
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a portal operation.
#[derive(Error, Debug)]
pub enum FoiError {
    /// Login was rejected, or the page after login does not look signed in.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Neither the premium nor the standard request workflow is reachable.
    #[error("no usable interface (premium: {premium}; standard: {standard})")]
    InterfaceUnavailable { premium: String, standard: String },

    /// Expected form or fields are missing from a page.
    #[error("unexpected page structure: {0}")]
    FormParse(#[from] FormParseError),

    /// Timeout or connection failure on a request.
    #[error("{kind} for {url}: {message}")]
    Network {
        kind: NetworkErrorKind,
        url: String,
        message: String,
    },

    /// The portal answered but rejected the submission.
    #[error("submission rejected: {0}")]
    Submission(String),

    /// A page that should have loaded answered with an unexpected status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Initialization(#[from] InitializationError),
}
