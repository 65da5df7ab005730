mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, Session};
use config::{CliConfig, CliOverrides};
use ripple_rest::ComponentRegistry;
use secrecy::SecretString;
use std::path::PathBuf;

/// Ripple REST client - issue Ripple REST API calls from the command line
#[derive(Parser)]
#[command(name = "ripple-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ripple REST base URL, including the version segment (overrides config)
    #[arg(short, long)]
    server_url: Option<String>,

    /// Allow plain http:// server URLs (overrides config)
    #[arg(long)]
    allow_insecure_http: bool,

    /// Account secret for signed operations
    #[arg(long, env = "RIPPLE_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Return as soon as a transaction is submitted instead of waiting for validation
    #[arg(long)]
    no_validate: bool,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (RIPPLE__*) -> 4) CLI overrides
    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        server_url: cli.server_url.as_deref(),
        allow_insecure_http: cli.allow_insecure_http,
        log_json: cli.log_json,
    });

    logging::init(&config.logging, cli.verbose);

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("no command given; run `ripple-cli --help` for the list of commands");
    };

    tracing::info!(server_url = %config.client.server_url, "ripple-cli starting");

    let registry =
        ComponentRegistry::from_config(&config.client).context("failed to build HTTP client")?;
    let session = Session {
        registry,
        server_url: config.client.server_url.clone(),
        secret: cli.secret.map(SecretString::from),
        validated: !cli.no_validate,
    };

    let response = command.run(&session).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("failed to render response")?
    );
    Ok(())
}
