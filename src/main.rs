//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `result_relay` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C cancellation
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use result_relay::config::{Cli, Command};
use result_relay::initialization::init_logger_with;
use result_relay::{parse_payloads, LoggingObserver, ResultClient, SubmissionPayload};

#[tokio::main]
async fn main() -> Result<()> {
    // Load GAS_WEBAPP_URL / GAS_AUTH_TOKEN from .env (if it exists)
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
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

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("result_relay configuration error: {:#}", e);
            process::exit(1);
        }
    };

    let cancel = cancel_on_ctrl_c();
    let client = client.with_cancellation(cancel);

    let succeeded = match &cli.command {
        Command::Probe => client.test_connection().await,
        Command::Submit { id, result, score } => {
            submit_one(&client, SubmissionPayload::new(*id, result.clone(), *score)).await
        }
        Command::Batch { file } => match submit_file(&client, file).await {
            Ok(all_ok) => all_ok,
            Err(e) => {
                eprintln!("result_relay error: {:#}", e);
                false
            }
        },
        Command::Demo => run_demo(&client).await,
    };

    if !succeeded {
        process::exit(1);
    }
    Ok(())
}

fn build_client(cli: &Cli) -> Result<ResultClient> {
    let provider = cli
        .credential_provider()
        .context("Failed to load credentials")?;
    let config = cli
        .client_config(provider.as_ref())
        .context("Invalid client configuration")?;
    let client = ResultClient::new(config).context("Failed to initialize HTTP clients")?;
    Ok(client.with_observer(Arc::new(LoggingObserver)))
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight submissions");
            child.cancel();
        }
    });
    token
}

async fn submit_one(client: &ResultClient, payload: SubmissionPayload) -> bool {
    let outcome = client.submit(&payload).await;
    if outcome.is_success() {
        println!("Submission successful: {}", outcome);
        true
    } else {
        eprintln!("Submission failed: {}", outcome);
        false
    }
}

async fn submit_file(client: &ResultClient, path: &Path) -> Result<bool> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let items = parse_payloads(&text)
        .with_context(|| format!("Failed to parse payloads from {}", path.display()))?;

    let result = client.submit_batch(&items).await;
    println!(
        "Batch complete: {}/{} successful",
        result.success_count(),
        result.len()
    );
    for (index, entry) in result.entries.iter().enumerate() {
        if !entry.outcome.is_success() {
            eprintln!("  item {}: {}", index + 1, entry.outcome);
        }
    }
    Ok(result.all_succeeded())
}

async fn run_demo(client: &ResultClient) -> bool {
    if !client.test_connection().await {
        error!("Aborting: connection test failed");
        return false;
    }

    info!("Single submission test");
    let single = submit_one(
        client,
        SubmissionPayload::new(101, "Optimization Complete", 98.5),
    )
    .await;

    info!("Batch submission test");
    let items = [
        SubmissionPayload::new(201, "Batch Item 1", 85.0),
        SubmissionPayload::new(202, "Batch Item 2", 92.0),
        SubmissionPayload::new(203, "Batch Item 3", 78.0),
    ];
    let result = client.submit_batch(&items).await;

    single && result.all_succeeded()
}
