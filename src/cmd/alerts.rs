use clap::{Args, Subcommand};

use crate::catalog;
use crate::cmd::{Outcome, render};
use crate::error::{AppError, AppResult};
use crate::workflow::view;

#[derive(Args, Debug, Clone)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlertsCommand {
    /// List the canned security alert templates.
    List,
    /// Show one template with its suggested ticket details.
    Show { id: String },
}

pub fn run(command: AlertsCommand) -> AppResult<Outcome> {
    match command {
        AlertsCommand::List => {
            println!("Security alert templates");
            println!("Create a ticket from one with `itsm-demo tickets create --from-alert <id> --project-id <project>`.");
            println!();
            for card in view::alert_cards() {
                render::alert_card(&card);
                println!();
            }
        }
        AlertsCommand::Show { id } => {
            let alert = catalog::find(&id).ok_or_else(|| unknown_alert(&id))?;
            render::alert_detail(&view::alert_detail(alert));
        }
    }
    Ok(Outcome::Done)
}

pub fn unknown_alert(id: &str) -> AppError {
    let known = catalog::all()
        .iter()
        .map(|alert| alert.id)
        .collect::<Vec<_>>()
        .join(", ");
    AppError::NotFound(format!("no alert template '{id}' (available: {known})"))
}
