mod config;
mod error;
mod ip;
mod provider;
mod report;
mod update;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::config::{Config, API_KEY_ENV};
use crate::error::Error;
use crate::ip::IpResolver;
use crate::provider::namecheap::NamecheapClient;
use crate::provider::UpdateOutcome;

#[derive(Parser, Debug)]
#[command(name = "namecheap-vercel-dns")]
#[command(about = "Point a Namecheap domain at Vercel by replacing its host records")]
struct Args {
    /// Namecheap username (prompted for when omitted)
    username: Option<String>,

    /// Path to the configuration file (defaults to ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first (before logger init)
    let (mut config, source) = Config::discover(args.config.as_deref())?;

    // Initialize logger with config log level (env var takes precedence)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level)
    ).init();

    info!("Loaded configuration from: {}", source);

    config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    config.validate()?;

    let username = match args.username {
        Some(name) => name,
        None => report::prompt_username(io::stdin().lock(), io::stdout())
            .context("Failed to read username")?,
    };

    let succeeded = run(&config, username, reqwest::Client::new(), io::stdout().lock()).await?;

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Looks up the public IP, replaces the host records and reports the result.
/// Returns whether the registrar accepted the update.
async fn run<W: Write>(
    config: &Config,
    username: String,
    http: reqwest::Client,
    mut out: W,
) -> Result<bool> {
    // Fetched once; shown to the operator and sent as ClientIp.
    let client_ip = IpResolver::new(http.clone(), config.registrar.ip_lookup_url.clone())
        .lookup()
        .await
        .context("Failed to look up public IP")?;

    report::banner(&mut out, &config.domain.name(), &username, &client_ip)?;

    let client = NamecheapClient::new(
        http,
        config.registrar.api_url.clone(),
        username,
        config.registrar.api_key.clone(),
        client_ip,
    );

    let outcome = match update::update_dns_records(&client, config).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Error::Parse { raw, .. } = &err {
                report::raw_response(&mut out, raw)?;
            }
            return Err(anyhow::Error::new(err).context("Failed to update DNS records"));
        }
    };

    report::raw_response(&mut out, outcome.raw())?;

    match outcome {
        UpdateOutcome::Success { records, .. } => {
            report::success(&mut out, config, &records)?;
            Ok(true)
        }
        UpdateOutcome::Failure { message, .. } => {
            report::failure(&mut out, &message)?;
            Ok(false)
        }
    }
}
