//! Tests for CLI parsing and config assembly.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use result_relay::config::{Cli, Command};
use result_relay::StaticCredentials;
use secrecy::ExposeSecret;
use tempfile::NamedTempFile;

#[test]
fn test_submit_subcommand() {
    let cli = Cli::try_parse_from([
        "result_relay",
        "submit",
        "--id",
        "101",
        "--result",
        "Optimization Complete",
        "--score",
        "98.5",
    ])
    .unwrap();

    match cli.command {
        Command::Submit { id, result, score } => {
            assert_eq!(id, 101);
            assert_eq!(result, "Optimization Complete");
            assert_eq!(score, 98.5);
        }
        other => panic!("expected submit, got {other:?}"),
    }
    assert!(!cli.use_auth);
    assert_eq!(cli.max_retries, 3);
    assert_eq!(cli.concurrency, 1);
}

#[test]
fn test_batch_subcommand_and_global_options() {
    let cli = Cli::try_parse_from([
        "result_relay",
        "--max-retries",
        "5",
        "--backoff-ms",
        "250",
        "--concurrency",
        "4",
        "--login-host",
        "login.example.org",
        "--login-host",
        "sso.example.org",
        "--non-retryable-code",
        "BAD_SHEET",
        "batch",
        "results.jsonl",
    ])
    .unwrap();

    assert!(matches!(cli.command, Command::Batch { ref file } if file == &PathBuf::from("results.jsonl")));
    assert_eq!(cli.login_hosts, vec!["login.example.org", "sso.example.org"]);

    let config = cli
        .client_config(&StaticCredentials::new("https://script.google.com/macros/s/abc/exec"))
        .unwrap();
    assert_eq!(config.max_retries(), 5);
    assert_eq!(config.backoff_unit(), Duration::from_millis(250));
    assert_eq!(config.batch_concurrency(), 4);
    assert_eq!(config.login_hosts().len(), 2);
    assert!(config.is_non_retryable_code("BAD_SHEET"));
    assert!(!config.is_non_retryable_code("INVALID_JSON"));
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["result_relay"]).is_err());
    assert!(Cli::try_parse_from(["result_relay", "submit", "--id", "1"]).is_err());
}

#[test]
fn test_submit_help_describes_fields() {
    let mut cmd = Cli::command();
    let help = cmd
        .find_subcommand_mut("submit")
        .unwrap()
        .render_help()
        .to_string();
    assert!(help.contains("Record id"));
    assert!(help.contains("Result text"));
    assert!(help.contains("Numeric score"));
}

#[test]
fn test_zero_retries_is_config_error() {
    let cli = Cli::try_parse_from(["result_relay", "--max-retries", "0", "probe"]).unwrap();
    let err = cli
        .client_config(&StaticCredentials::new("https://example.com/exec"))
        .unwrap_err();
    assert_eq!(err.field, "max_retries");
}

#[test]
fn test_url_flag_takes_precedence_over_secrets_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"GAS_WEBAPP_URL": "https://from-file.example/exec", "GAS_AUTH_TOKEN": "file-token"}}"#
    )
    .unwrap();
    let secrets = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from([
        "result_relay",
        "--url",
        "https://from-flag.example/exec",
        "--secrets-file",
        &secrets,
        "--use-auth",
        "probe",
    ])
    .unwrap();
    let provider = cli.credential_provider().unwrap();
    let config = cli.client_config(provider.as_ref()).unwrap();

    assert_eq!(config.url().as_str(), "https://from-flag.example/exec");
    // The token still comes from the secrets file
    assert_eq!(
        config.auth_token().unwrap().expose_secret(),
        "file-token"
    );
}

#[test]
fn test_auth_token_ignored_without_use_auth() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"GAS_WEBAPP_URL": "https://from-file.example/exec", "GAS_AUTH_TOKEN": "file-token"}}"#
    )
    .unwrap();
    let secrets = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["result_relay", "--secrets-file", &secrets, "probe"]).unwrap();
    let provider = cli.credential_provider().unwrap();
    let config = cli.client_config(provider.as_ref()).unwrap();

    assert_eq!(config.url().as_str(), "https://from-file.example/exec");
    assert!(config.auth_token().is_none());
}

#[test]
fn test_unreadable_secrets_file() {
    let cli = Cli::try_parse_from([
        "result_relay",
        "--secrets-file",
        "/nonexistent/secrets.json",
        "probe",
    ])
    .unwrap();
    let err = cli.credential_provider().err().unwrap();
    assert_eq!(err.field, "secrets_file");
}
