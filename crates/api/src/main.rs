//! CreatorLink - social account linking client
//!
//! Main entry point for the `creatorlink` binary.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use creatorlink_core::Confirmation;
use creatorlink_domain::{Config, CreatorLinkError, PlatformStatus};
use creatorlink_infra::{config, BackendClient, StaticTokenProvider};
use creatorlink_lib::adapters::{AssumeYes, TerminalConfirmation};
use creatorlink_lib::commands::{connections, platforms};
use creatorlink_lib::routes;
use creatorlink_lib::utils::logging::init_tracing;
use creatorlink_lib::AppContext;
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "creatorlink")]
#[command(about = "Link and manage creator social accounts")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON or TOML); overrides environment lookup
    #[arg(short, long, global = true, env = "CREATORLINK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the /api/v0/platforms route
    Serve,

    /// Social connection operations
    #[command(subcommand)]
    Connections(ConnectionsCommand),

    /// Platform catalog operations
    #[command(subcommand)]
    Platforms(PlatformsCommand),
}

#[derive(Subcommand)]
enum ConnectionsCommand {
    /// List linked accounts
    List {
        /// Only accounts on this platform (name or slug)
        #[arg(short, long)]
        platform: Option<String>,

        /// Only accounts with an expired token or failing automation
        #[arg(long)]
        attention: bool,
    },

    /// Link a new account through the platform's OAuth window
    Connect {
        platform: String,

        /// Extra scopes on top of the platform's required permissions
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
    },

    /// Re-validate a connection's token
    Refresh { id: String },

    /// Enable or disable automation for a connection
    Automation {
        id: String,

        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Remove a linked account
    Disconnect {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PlatformsCommand {
    /// List the platform catalog
    List {
        /// Filter by status (active or inactive)
        #[arg(short, long)]
        status: Option<PlatformStatus>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "error: {err:#}");
            let needs_admin = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<CreatorLinkError>())
                .is_some_and(CreatorLinkError::is_configuration);
            if needs_admin {
                let _ = writeln!(stderr, "hint: ask a workspace administrator to configure this platform");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config).context("failed to load configuration")?;

    match cli.command {
        Commands::Serve => serve(config).await.map(|()| ExitCode::SUCCESS),
        Commands::Connections(command) => run_connections(config, command).await,
        Commands::Platforms(PlatformsCommand::List { status }) => {
            let ctx = context(config, Arc::new(TerminalConfirmation))?;
            let platforms = platforms::list_platforms(&ctx, status).await?;
            emit(&platforms)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_connections(config: Config, command: ConnectionsCommand) -> Result<ExitCode> {
    let confirmation: Arc<dyn Confirmation> = match &command {
        ConnectionsCommand::Disconnect { yes: true, .. } => Arc::new(AssumeYes),
        _ => Arc::new(TerminalConfirmation),
    };
    let ctx = context(config, confirmation)?;

    match command {
        ConnectionsCommand::List { platform, attention } => {
            emit(&connections::list_connections(&ctx, platform.as_deref(), attention).await?)?;
        }
        ConnectionsCommand::Connect { platform, scopes } => {
            let outcome = connections::connect(&ctx, &platform, &scopes).await?;
            emit(&outcome)?;
            if let Some(reason) = outcome.failure_reason() {
                writeln!(io::stderr().lock(), "{reason}")?;
                return Ok(ExitCode::FAILURE);
            }
        }
        ConnectionsCommand::Refresh { id } => emit(&connections::refresh(&ctx, &id).await?)?,
        ConnectionsCommand::Automation { id, enabled } => {
            emit(&connections::toggle_automation(&ctx, &id, enabled).await?)?;
        }
        ConnectionsCommand::Disconnect { id, .. } => match connections::disconnect(&ctx, &id).await {
            Ok(()) => emit(&serde_json::json!({ "disconnected": id }))?,
            Err(CreatorLinkError::Cancelled(reason)) => {
                info!(%reason, "disconnect cancelled");
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(path: Option<PathBuf>) -> creatorlink_domain::Result<Config> {
    match path {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
}

fn context(config: Config, confirmation: Arc<dyn Confirmation>) -> Result<AppContext> {
    let auth = StaticTokenProvider::from_env().map_err(CreatorLinkError::from)?;
    Ok(AppContext::new(config, Arc::new(auth), confirmation)?)
}

async fn serve(config: Config) -> Result<()> {
    // Requests supply their own token; the base client never sends one.
    let backend = BackendClient::from_config(&config.backend, Arc::new(StaticTokenProvider::new("")))?;
    let app = routes::router(Arc::new(backend));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;
    info!(address = %config.server.bind_address, "serving platforms route");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
