mod catalog;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::alerts::{self, AlertsArgs};
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::directory::{self, ListArgs};
use crate::cmd::tickets::{self, TicketsArgs};
use crate::cmd::{Outcome, docs, status};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;

const LOG_ENV: &str = "ITSM_DEMO_LOG";

#[derive(Parser)]
#[command(
    name = "itsm-demo",
    author,
    version,
    about = "Demo client for the Leen ITSM ticketing API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API credentials.
    Config(ConfigArgs),
    /// Browse the canned security alert templates.
    Alerts(AlertsArgs),
    /// List projects in the connected ITSM system.
    Projects(ListArgs),
    /// List users in the connected ITSM system.
    Users(ListArgs),
    /// Create, list, view and update tickets.
    Tickets(TicketsArgs),
    /// Test the connection and load projects and users.
    Status,
    /// Show the API reference.
    Docs,
}

#[tokio::main]
async fn main() {
    init_tracing();

    match run().await {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Failed) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> AppResult<Outcome> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command).await,
        Commands::Alerts(args) => alerts::run(args.command),
        Commands::Docs => Ok(docs::run()),
        Commands::Status => {
            let config = AppConfig::load()?;
            status::run(&config).await
        }
        Commands::Projects(args) => directory::run_projects(&connect()?, args).await,
        Commands::Users(args) => directory::run_users(&connect()?, args).await,
        Commands::Tickets(args) => tickets::run(&connect()?, args.command).await,
    }
}

fn connect() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let context = AppContext::from_config(config)?;
    debug!(
        config_path = %context.config.config_path.display(),
        "ITSM client ready"
    );
    Ok(context)
}
