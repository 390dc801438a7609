//! `ntrl-store` - inspect and edit the NTRL secure store from a terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ntrl_secure_store::utils::describe_size;
use ntrl_secure_store::{Config, Platform, SecureStore, paths};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ntrl-store", version, about = "Inspect the NTRL secure store")]
struct Cli {
    /// Config file (default: $NTRL_HOME/store.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Platform identifier, overriding the config (ios, android, web, macos, windows, linux)
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored under a key
    Get { key: String },
    /// Store a string value
    Set { key: String, value: String },
    /// Delete a key (best effort)
    Delete { key: String },
    /// Print a stored JSON value, pretty-printed
    GetJson { key: String },
    /// Store JSON text, validating it first
    SetJson { key: String, json: String },
    /// Check whether the backend can store values
    Probe,
    /// List physically stored keys (local backend only)
    Keys,
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Initialize stderr logging filtered by `RUST_LOG` (default `info`).
fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(platform) = cli.platform {
        config.store.platform = Some(platform);
    }

    let validation = config.validate()?;
    for warning in &validation.warnings {
        tracing::warn!("{warning}");
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    if let Commands::Config = cli.command {
        print_config(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let store = SecureStore::from_config(&config).map_err(|e| e.into_anyhow())?;
    execute(&store, cli.command).await
}

async fn execute(store: &SecureStore, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Get { key } => match store.get(&key).await {
            Some(value) => {
                println!("{value}");
                Ok(ExitCode::SUCCESS)
            },
            None => {
                eprintln!("'{key}' not found");
                Ok(ExitCode::FAILURE)
            },
        },
        Commands::Set { key, value } => {
            store.set(&key, &value).await?;
            println!("Stored '{key}' ({})", describe_size(value.len()));
            Ok(ExitCode::SUCCESS)
        },
        Commands::Delete { key } => {
            store.delete(&key).await;
            println!("Deleted '{key}'");
            Ok(ExitCode::SUCCESS)
        },
        Commands::GetJson { key } => match store.get_json::<serde_json::Value>(&key).await {
            Some(value) => {
                println!("{}", serde_json::to_string_pretty(&value)?);
                Ok(ExitCode::SUCCESS)
            },
            None => {
                eprintln!("'{key}' not found or not valid JSON");
                Ok(ExitCode::FAILURE)
            },
        },
        Commands::SetJson { key, json } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Argument is not valid JSON")?;
            store.set_json(&key, &value).await?;
            println!("Stored '{key}'");
            Ok(ExitCode::SUCCESS)
        },
        Commands::Probe => {
            let available = store.is_available().await;
            println!(
                "{} backend: {}",
                store.backend_kind(),
                if available { "available" } else { "unavailable" }
            );
            Ok(if available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Commands::Keys => match store.local_keys().await? {
            Some(keys) => {
                for key in keys {
                    println!("{key}");
                }
                Ok(ExitCode::SUCCESS)
            },
            None => {
                eprintln!("The {} backend cannot list its keys", store.backend_kind());
                Ok(ExitCode::FAILURE)
            },
        },
        Commands::Config => Ok(ExitCode::SUCCESS),
    }
}

fn print_config(config: &Config) -> Result<()> {
    let platform = config.platform();
    println!("platform:        {platform}");
    println!("backend:         {}", platform.backend_kind());
    println!("keyring service: {}", config.store.keyring_service);
    println!("local path:      {}", config.local_path()?.display());
    println!("config file:     {}", paths::get_config_path()?.display());
    Ok(())
}
