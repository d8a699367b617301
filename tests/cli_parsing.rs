//! Tests for CLI subcommand parsing.

use std::path::PathBuf;

use asktheeu_client::cli::{Cli, Command};
use asktheeu_client::{EmbargoDuration, LogFormat};
use clap::Parser;

#[test]
fn test_draft_command_with_all_flags() {
    let cli = Cli::try_parse_from([
        "asktheeu",
        "--debug",
        "--json",
        "--log-format",
        "json",
        "draft",
        "--body",
        "European Commission",
        "--title",
        "Meeting minutes",
        "--text-file",
        "letter.txt",
        "--embargo",
        "12",
        "--send",
        "--bodies-csv",
        "bodies.csv",
    ])
    .unwrap();

    assert!(cli.debug);
    assert!(cli.json);
    assert!(matches!(cli.log_format, LogFormat::Json));
    let Command::Draft(args) = cli.command else {
        panic!("expected draft command");
    };
    assert_eq!(args.body, "European Commission");
    assert_eq!(args.text, None);
    assert_eq!(args.text_file, Some(PathBuf::from("letter.txt")));
    assert_eq!(args.embargo, Some(EmbargoDuration::TwelveMonths));
    assert!(args.send);
    assert_eq!(args.bodies_csv, Some(PathBuf::from("bodies.csv")));
}

#[test]
fn test_text_and_text_file_conflict() {
    let result = Cli::try_parse_from([
        "asktheeu",
        "draft",
        "--body",
        "576",
        "--title",
        "T",
        "--text",
        "B",
        "--text-file",
        "letter.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_embargo_rejected() {
    let result = Cli::try_parse_from([
        "asktheeu", "draft", "--body", "576", "--title", "T", "--text", "B", "--embargo", "9",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_send_command_defaults_to_premium() {
    let cli = Cli::try_parse_from(["asktheeu", "send", "42"]).unwrap();
    match cli.command {
        Command::Send { draft_id, standard } => {
            assert_eq!(draft_id, "42");
            assert!(!standard);
        }
        other => panic!("unexpected command {:?}", other),
    }

    let cli = Cli::try_parse_from(["asktheeu", "send", "42", "--standard"]).unwrap();
    assert!(matches!(cli.command, Command::Send { standard: true, .. }));
}

#[test]
fn test_list_page_and_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "asktheeu",
        "list",
        "--page",
        "3",
        "--timeout-seconds",
        "15",
        "--base-url",
        "https://staging.asktheeu.org",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::List { page: 3 }));
    assert_eq!(cli.timeout_seconds, Some(15));
    assert_eq!(cli.base_url.as_deref(), Some("https://staging.asktheeu.org"));
}

#[test]
fn test_bodies_requires_csv() {
    assert!(Cli::try_parse_from(["asktheeu", "bodies", "commission"]).is_err());
    let cli = Cli::try_parse_from([
        "asktheeu",
        "bodies",
        "commission",
        "--bodies-csv",
        "bodies.csv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Bodies { .. }));
}

#[test]
fn test_no_credential_flags() {
    assert!(Cli::try_parse_from(["asktheeu", "--password", "x", "login"]).is_err());
}
