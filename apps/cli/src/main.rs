use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{DocQaClient, InteractionController};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod render;
mod repl;

/// Terminal client for a document question-answering service.
#[derive(Parser, Debug)]
#[command(name = "docqa", version)]
struct Args {
    /// Base URL of the Q&A API (overrides config file and environment).
    #[arg(long)]
    api_base: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Settings file; defaults to ./docqa.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(api_base) = args.api_base {
        settings.api_base = api_base;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }
    let api_base = config::validate_api_base(&settings.api_base)?;
    let request_timeout = settings.request_timeout()?;
    tracing::info!(%api_base, timeout_secs = settings.request_timeout_secs, "starting session");

    let client = DocQaClient::with_timeout(api_base, request_timeout)
        .context("failed to build HTTP client")?;
    let mut controller = InteractionController::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(&mut controller, stdin, &mut stdout).await
}
