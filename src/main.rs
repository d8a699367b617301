//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `asktheeu_client` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All portal functionality is implemented in the library crate.

use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use asktheeu_client::cli::{Cli, Command, DraftArgs};
use asktheeu_client::initialization::init_logger_with;
use asktheeu_client::{
    create_draft_request_with, list_requests, login, send_request, DraftRequest,
    PublicBodyDirectory, Session,
};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(&cli).await {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("asktheeu error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs one subcommand; `Ok(false)` means the portal operation failed.
async fn run(cli: &Cli) -> Result<bool> {
    if let Command::Bodies { query, bodies_csv } = &cli.command {
        let directory = PublicBodyDirectory::from_path(bodies_csv)
            .context("Failed to load public body directory")?;
        let found = directory.search(query);
        if cli.json {
            print_json(&found)?;
        } else if found.is_empty() {
            println!("No public body matches '{}'", query);
        } else {
            for body in &found {
                println!("{:>6}  {}  {}", body.id, body.name, body.url);
            }
        }
        return Ok(true);
    }

    let config = cli.config().context("Invalid configuration")?;
    let session = login(&config, cli.debug)
        .await
        .context("Failed to sign in")?;

    match &cli.command {
        Command::Login => {
            println!("Signed in to {}", session.base_url());
            Ok(true)
        }
        Command::Draft(args) => draft(cli, &session, args).await,
        Command::Send {
            draft_id,
            standard,
        } => {
            let result = send_request(&session, draft_id, !standard).await;
            report_send(cli, &result)?;
            Ok(result.success)
        }
        Command::List { page } => {
            let listing = list_requests(&session, *page)
                .await
                .context("Failed to list requests")?;
            if cli.json {
                print_json(&listing)?;
            } else {
                for request in &listing.requests {
                    println!(
                        "{:<12} {:<20} {:<18} {}",
                        request.id.as_deref().unwrap_or("-"),
                        request.status,
                        request.date.as_deref().unwrap_or("-"),
                        request.title
                    );
                }
                if let Some(next) = listing.pagination.next_page {
                    println!("More: --page {}", next);
                }
            }
            Ok(true)
        }
        Command::Bodies { .. } => Ok(true),
    }
}

async fn draft(cli: &Cli, session: &Session, args: &DraftArgs) -> Result<bool> {
    let public_body_id = resolve_body(args)?;
    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("--text or --text-file is required"),
    };

    let mut request = DraftRequest::new(public_body_id, args.title.clone(), text);
    request.embargo = args.embargo;
    let result = create_draft_request_with(session, &request, cli.debug).await;

    if !args.send || !result.success {
        report_draft(cli, &result)?;
        return Ok(result.success);
    }
    if !cli.json {
        report_draft(cli, &result)?;
    }

    let (Some(id), Some(kind)) = (&result.draft_id, result.interface_used) else {
        return Ok(false);
    };
    let sent = send_request(session, id, kind.is_pro()).await;
    if cli.json {
        print_json(&serde_json::json!({ "draft": result, "send": sent }))?;
    } else {
        report_send(cli, &sent)?;
    }
    Ok(sent.success)
}

/// Numeric id as given, otherwise a lookup in `--bodies-csv`.
fn resolve_body(args: &DraftArgs) -> Result<String> {
    let key = args.body.trim();
    if key.chars().all(|c| c.is_ascii_digit()) && !key.is_empty() {
        return Ok(key.to_string());
    }
    let Some(path) = &args.bodies_csv else {
        bail!("--body '{}' is not a numeric id; pass --bodies-csv to look it up", key);
    };
    let directory =
        PublicBodyDirectory::from_path(path).context("Failed to load public body directory")?;
    match directory.resolve(key) {
        Some(body) => {
            log::info!("Resolved '{}' to {} ({})", key, body.name, body.id);
            Ok(body.id.clone())
        }
        None => bail!("No public body matches '{}'", key),
    }
}

fn report_draft(cli: &Cli, result: &asktheeu_client::DraftResult) -> Result<()> {
    if cli.json {
        return print_json(result);
    }
    match (&result.draft_id, result.interface_used) {
        (Some(id), Some(kind)) if result.success => println!(
            "Draft {} created via {} interface: {}",
            id,
            kind,
            result.draft_url.as_deref().unwrap_or("-")
        ),
        _ => eprintln!(
            "Draft not created: {}",
            result.error.as_deref().unwrap_or("unknown error")
        ),
    }
    Ok(())
}

fn report_send(cli: &Cli, result: &asktheeu_client::SendResult) -> Result<()> {
    if cli.json {
        return print_json(result);
    }
    if result.success {
        println!(
            "Request sent: {}",
            result.request_url.as_deref().unwrap_or("-")
        );
    } else {
        eprintln!(
            "Request not sent: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
    println!("{}", rendered);
    Ok(())
}
