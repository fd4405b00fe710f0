use clap::{Args, Subcommand};

use crate::cmd::alerts::unknown_alert;
use crate::cmd::{Outcome, render};
use crate::context::AppContext;
use crate::domain::ticket::{Priority, Ticket, TicketStatus, TicketType, TicketUpdate};
use crate::error::{AppError, AppResult};
use crate::workflow::controller::{Command, DemoController};
use crate::workflow::state::{Phase, Tab};
use crate::workflow::view;

#[derive(Args, Debug, Clone)]
pub struct TicketsArgs {
    #[command(subcommand)]
    pub command: TicketsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TicketsCommand {
    /// List the first page of tickets.
    List,
    /// Fetch a ticket by its Leen ID.
    Get {
        id: String,
        /// Print the ticket as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fetch a ticket by its identifier.
    Find {
        identifier: String,
        /// Print the ticket as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Create a ticket, optionally pre-filled from an alert template.
    Create(CreateArgs),
    /// Change fields of an existing ticket.
    Update(UpdateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Pre-fill type, name, description, priority and identifier from this alert.
    #[arg(long)]
    pub from_alert: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    /// Bug, Task, Story or Epic.
    #[arg(long = "type")]
    pub ticket_type: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// CRITICAL, HIGH, MEDIUM, LOW or INFORMATIONAL.
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long = "assignee")]
    pub assigned_user_id: Option<String>,
    /// Custom identifier; the backend generates one when omitted.
    #[arg(long)]
    pub identifier: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long = "type")]
    pub ticket_type: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long = "assignee")]
    pub assigned_user_id: Option<String>,
}

pub async fn run(ctx: &AppContext, command: TicketsCommand) -> AppResult<Outcome> {
    match command {
        TicketsCommand::List => run_list(ctx).await,
        TicketsCommand::Get { id, json } => {
            let ticket = ctx.itsm.get_ticket(&id).await?;
            show(&ticket, json)
        }
        TicketsCommand::Find { identifier, json } => {
            let ticket = ctx.itsm.get_ticket_by_identifier(&identifier).await?;
            show(&ticket, json)
        }
        TicketsCommand::Create(args) => run_create(ctx, args).await,
        TicketsCommand::Update(args) => {
            let id = args.id.clone();
            let update = build_update(args)?;
            let ticket = ctx.itsm.update_ticket(&id, &update).await?;
            println!("Ticket {} updated.", ticket.display_key());
            show(&ticket, false)
        }
    }
}

async fn run_list(ctx: &AppContext) -> AppResult<Outcome> {
    let mut controller = DemoController::new(ctx.itsm.clone());
    controller.dispatch(Command::SwitchTab(Tab::Manage)).await;

    let state = controller.state();
    render::ticket_list(&view::ticket_list(state));
    render::activity(state);
    Ok(match state.listing {
        Phase::Failed(_) => Outcome::Failed,
        _ => Outcome::Done,
    })
}

async fn run_create(ctx: &AppContext, args: CreateArgs) -> AppResult<Outcome> {
    let mut controller = DemoController::new(ctx.itsm.clone());

    if let Some(alert_id) = &args.from_alert {
        controller
            .dispatch(Command::SelectAlert(alert_id.clone()))
            .await;
        if controller.state().selected_alert.is_none() {
            return Err(unknown_alert(alert_id));
        }
        controller.dispatch(Command::CreateFromAlert).await;
    } else {
        controller.dispatch(Command::SwitchTab(Tab::Create)).await;
    }

    let mut form = controller.state().form.clone();
    let overrides = [
        (&mut form.project_id, args.project_id),
        (&mut form.ticket_type, args.ticket_type),
        (&mut form.name, args.name),
        (&mut form.description, args.description),
        (&mut form.priority, args.priority),
        (&mut form.assigned_user_id, args.assigned_user_id),
        (&mut form.identifier, args.identifier),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
    controller.dispatch(Command::EditForm(form)).await;
    controller.dispatch(Command::SubmitTicket).await;

    let state = controller.state();
    if let Some(panel) = view::creation_panel(state) {
        render::creation_panel(&panel);
    }
    render::activity(state);
    Ok(match state.creation {
        Phase::Success(_) => Outcome::Done,
        _ => Outcome::Failed,
    })
}

fn show(ticket: &Ticket, json: bool) -> AppResult<Outcome> {
    if json {
        println!("{}", serde_json::to_string_pretty(ticket)?);
    } else {
        render::ticket(ticket);
    }
    Ok(Outcome::Done)
}

fn build_update(args: UpdateArgs) -> AppResult<TicketUpdate> {
    let update = TicketUpdate {
        ticket_type: parse_field(args.ticket_type, "type", TicketType::from_str)?,
        name: args.name,
        description: args.description,
        priority: parse_field(args.priority, "priority", Priority::from_str)?,
        status: parse_field(args.status, "status", TicketStatus::from_str)?,
        assigned_user_id: args.assigned_user_id,
    };
    if update.is_empty() {
        return Err(AppError::InvalidTicket(
            "nothing to update; pass at least one field".to_string(),
        ));
    }
    Ok(update)
}

fn parse_field<T>(
    value: Option<String>,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> AppResult<Option<T>> {
    value
        .map(|value| {
            parse(&value).ok_or_else(|| AppError::InvalidTicket(format!("unknown {field} '{value}'")))
        })
        .transpose()
}
