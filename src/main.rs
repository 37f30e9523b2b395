// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Factlens: Fact-Checking Content Service
//!
//! Command-line entry point for the API server and its configuration.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use factlens::analysis::build_analyzer;
use factlens::config::{AppConfig, RunMode};
use factlens::db;
use factlens::ollama::OllamaClient;

/// Factlens CLI - Fact-checking content service
#[derive(Parser, Debug)]
#[command(name = "factlens")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Fact-checking content analysis API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Run without a database
        #[arg(long)]
        demo: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show AI engine status
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Some(Commands::Serve { host, port, demo }) => run_serve(config, host, port, demo).await,
        Some(Commands::Config { action }) => run_config_command(config, action),
        Some(Commands::Status) => run_status(config).await,
        None => run_serve(config, None, None, false).await,
    }
}

async fn run_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    demo: bool,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    if demo {
        config.mode = RunMode::Demo;
        config.database.path = None;
    }

    info!("Factlens v{} ({:?} mode)", env!("CARGO_PKG_VERSION"), config.mode);

    let db_state = db::connect(&config)?;
    let analyzer = build_analyzer(&config);

    factlens::web::start_server(config, db_state, analyzer).await?;
    Ok(())
}

fn run_config_command(config: AppConfig, action: ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Generate { output, force } => {
            write_default_config(&output, force)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }
    Ok(())
}

fn write_default_config(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite", output.display());
    }
    AppConfig::default().save(output)?;
    Ok(())
}

async fn run_status(config: AppConfig) -> anyhow::Result<()> {
    if !config.ai_engine.enabled {
        println!("AI engine: disabled (mock analysis)");
        return Ok(());
    }

    let client = OllamaClient::new(&config.ai_engine)?;
    println!("AI engine: {}", client.base_url());

    match client.health_check().await {
        Ok(()) => println!("Status: reachable"),
        Err(e) => {
            warn!("{}", e);
            println!("Status: unreachable (analysis falls back to mock results)");
            return Ok(());
        }
    }

    let model = &config.ai_engine.model;
    if client.model_available(model).await? {
        println!("Model {}: available", model);
    } else {
        println!("Model {}: missing (try `ollama pull {}`)", model, model);
    }
    Ok(())
}
