use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::cmd::Outcome;
use crate::config::{CredentialStore, DEFAULT_API_BASE_URL};
use crate::context::build_service;
use crate::error::AppResult;
use crate::workflow::session::{self, Session};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Enter API credentials and test the connection.
    Init,
    /// Show the stored credentials (API key masked).
    Show,
    /// Forget the stored credentials.
    Clear,
}

pub async fn run(command: ConfigCommand) -> AppResult<Outcome> {
    let store = CredentialStore::open_default()?;
    match command {
        ConfigCommand::Init => run_init(&store).await,
        ConfigCommand::Show => run_show(&store),
        ConfigCommand::Clear => {
            store.clear()?;
            println!("Credentials removed from {}", store.path().display());
            Ok(Outcome::Done)
        }
    }
}

async fn run_init(store: &CredentialStore) -> AppResult<Outcome> {
    let mut credentials = store.load()?.unwrap_or_default();

    println!("Connect to the Leen ITSM API.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Credentials are stored in cleartext in the local config file.");
    println!();

    apply_prompt(
        "API key (https://portal.leen.dev/settings/api-keys)",
        &mut credentials.api_key,
        true,
    )?;
    apply_prompt(
        "Connection ID (https://portal.leen.dev/integrations)",
        &mut credentials.connection_id,
        false,
    )?;
    apply_prompt("API base URL", &mut credentials.api_base_url, false)?;
    if credentials.api_base_url.trim().is_empty() {
        credentials.api_base_url = DEFAULT_API_BASE_URL.to_string();
    }

    store.save(&credentials)?;
    println!("\nCredentials saved to {}", store.path().display());

    println!("Testing connection...");
    match session::connect(Some(&credentials), build_service).await? {
        Session::Connected(_) => {
            println!("✓ Connected");
            Ok(Outcome::Done)
        }
        Session::NeedsConfiguration => {
            eprintln!("API key and connection ID are both required; run `itsm-demo config init` again.");
            Ok(Outcome::Failed)
        }
        Session::ConnectionFailed(error) => {
            eprintln!("✗ Connection failed: {}", error.message());
            if error.is_transient() {
                eprintln!("The server could not be reached; it may be temporarily unavailable.");
            }
            eprintln!("Please check your credentials and run `itsm-demo config init` to try again.");
            Ok(Outcome::Failed)
        }
    }
}

fn run_show(store: &CredentialStore) -> AppResult<Outcome> {
    println!("Configuration file: {}", store.path().display());
    let Some(credentials) = store.load()? else {
        println!("No credentials stored.");
        return Ok(Outcome::Done);
    };

    println!("API key: {}", mask_secret(&credentials.api_key));
    println!("Connection ID: {}", display_value(&credentials.connection_id));
    println!("API base URL: {}", display_value(&credentials.api_base_url));
    if !credentials.is_complete() {
        println!("Credentials are incomplete; run `itsm-demo config init`.");
    }
    Ok(Outcome::Done)
}

fn apply_prompt(field: &str, target: &mut String, secret: bool) -> AppResult<()> {
    let answer = read_answer(&prompt_label(field, target, secret))?;
    match parse_answer(&answer) {
        PromptAction::Keep => {}
        PromptAction::Clear => target.clear(),
        PromptAction::Set(value) => *target = value,
    }
    Ok(())
}

/// Question shown for one credential field. Secrets only ever show their
/// masked form.
fn prompt_label(field: &str, current: &str, secret: bool) -> String {
    if current.is_empty() {
        return format!("{field}: ");
    }
    let shown = if secret {
        mask_secret(current)
    } else {
        current.to_string()
    };
    format!("{field} (current: {shown}): ")
}

fn read_answer(label: &str) -> AppResult<String> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;
    drop(stdout);

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}

fn parse_answer(input: &str) -> PromptAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PromptAction::Keep
    } else if trimmed == "-" {
        PromptAction::Clear
    } else {
        PromptAction::Set(trimmed.to_string())
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "<not set>".to_string()
    } else {
        value.to_string()
    }
}

fn mask_secret(value: &str) -> String {
    match value.chars().count() {
        0 => "<not set>".to_string(),
        count if count > 6 => {
            let prefix: String = value.chars().take(3).collect();
            let suffix: String = value.chars().skip(count - 3).collect();
            format!("{prefix}***{suffix}")
        }
        _ => "***".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
