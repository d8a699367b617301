//! Command-line interface definition.
//!
//! Credentials are never taken from flags; they come from `ASKTHEEU_EMAIL`
//! and `ASKTHEEU_PASSWORD` (a `.env` file is loaded first by the binary).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, ConfigValidationError, LogFormat, LogLevel};
use crate::draft::EmbargoDuration;
use crate::error_handling::ConfigError;

/// Draft and send freedom-of-information requests on AskTheEU.org.
#[derive(Debug, Parser)]
#[command(name = "asktheeu", version, about)]
pub struct Cli {
    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// Portal root (overrides ASKTHEEU_DOMAIN)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Quote the portal's answers in error messages (credentials are redacted)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print result records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the configured credentials can sign in
    Login,

    /// Create a draft request (and optionally send it)
    Draft(DraftArgs),

    /// Send an existing draft
    Send {
        /// Numeric draft id
        draft_id: String,

        /// Use the standard workflow instead of Alaveteli Pro
        #[arg(long)]
        standard: bool,
    },

    /// List your requests
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Search the public body directory
    Bodies {
        /// Part of the body's name
        query: String,

        /// CSV export of public bodies (name, url, id)
        #[arg(long)]
        bodies_csv: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Public body: numeric id, or name/URL when --bodies-csv is given
    #[arg(long)]
    pub body: String,

    /// Request title
    #[arg(long)]
    pub title: String,

    /// Request text
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    pub text: Option<String>,

    /// File containing the request text
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// Embargo for Alaveteli Pro requests: 3, 6 or 12 (months)
    #[arg(long, value_parser = parse_embargo)]
    pub embargo: Option<EmbargoDuration>,

    /// Send the draft right after creating it
    #[arg(long)]
    pub send: bool,

    /// CSV export of public bodies used to resolve --body
    #[arg(long)]
    pub bodies_csv: Option<PathBuf>,
}

fn parse_embargo(value: &str) -> Result<EmbargoDuration, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not one of 3, 6, 12", value))
}

impl Cli {
    /// Library configuration from the environment plus the global flags.
    ///
    /// # Errors
    ///
    /// Returns an error when credentials are missing from the environment or
    /// the resulting configuration is invalid.
    pub fn config(&self) -> Result<Config, CliConfigError> {
        let mut config = Config::from_env()?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Configuration could not be assembled for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    #[error(transparent)]
    Env(#[from] ConfigError),

    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}
