//! Pure projections of [`DemoState`] into what a surface should show.
//! Nothing here formats for a particular output; the CLI renders these.

use crate::catalog;
use crate::domain::activity::ActivityLevel;
use crate::domain::alert::AlertTemplate;
use crate::domain::ticket::Ticket;
use crate::workflow::state::{DemoState, Phase};

pub const ACTIVITY_VIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCard {
    pub id: &'static str,
    pub severity: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

impl From<&'static AlertTemplate> for AlertCard {
    fn from(alert: &'static AlertTemplate) -> Self {
        Self {
            id: alert.id,
            severity: alert.severity.as_str(),
            category: alert.category,
            title: alert.title,
            summary: alert.summary_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDetail {
    pub card: AlertCard,
    pub description: &'static str,
    pub suggested_type: &'static str,
    pub suggested_priority: &'static str,
    pub identifier: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorLink {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationPanel {
    Busy,
    Created {
        id: String,
        identifier: String,
        status: &'static str,
        link: Option<VendorLink>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRow {
    pub key: String,
    pub status: &'static str,
    pub priority: Option<&'static str>,
    pub name: String,
    pub ticket_type: &'static str,
    pub summary: Option<String>,
    pub link: Option<VendorLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketList {
    NotLoaded,
    Loading,
    Empty,
    Failed(String),
    Rows(Vec<TicketRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLine {
    pub time: String,
    pub level: ActivityLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub fn alert_cards() -> Vec<AlertCard> {
    catalog::all().iter().map(AlertCard::from).collect()
}

pub fn alert_detail(alert: &'static AlertTemplate) -> AlertDetail {
    AlertDetail {
        card: AlertCard::from(alert),
        description: alert.description,
        suggested_type: alert.suggested_type.as_str(),
        suggested_priority: alert.suggested_priority.as_str(),
        identifier: alert.identifier,
    }
}

fn vendor_link(ticket: &Ticket) -> Option<VendorLink> {
    ticket.url.as_ref().map(|url| VendorLink {
        url: url.clone(),
        label: format!("View in {}", ticket.vendor_name()),
    })
}

pub fn creation_panel(state: &DemoState) -> Option<CreationPanel> {
    match &state.creation {
        Phase::Idle => None,
        Phase::Loading(_) => Some(CreationPanel::Busy),
        Phase::Success(ticket) => Some(CreationPanel::Created {
            id: ticket.id.clone(),
            identifier: ticket
                .identifier
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            status: ticket.status.as_str(),
            link: vendor_link(ticket),
        }),
        Phase::Failed(message) => Some(CreationPanel::Failed {
            message: message.clone(),
        }),
    }
}

pub fn ticket_row(ticket: &Ticket) -> TicketRow {
    TicketRow {
        key: ticket.display_key().to_string(),
        status: ticket.status.as_str(),
        priority: ticket.priority.map(|priority| priority.as_str()),
        name: ticket.name.clone(),
        ticket_type: ticket.ticket_type.as_str(),
        summary: ticket
            .description
            .as_deref()
            .and_then(|description| description.lines().next())
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string),
        link: vendor_link(ticket),
    }
}

pub fn ticket_list(state: &DemoState) -> TicketList {
    match &state.listing {
        Phase::Idle => TicketList::NotLoaded,
        Phase::Loading(_) => TicketList::Loading,
        Phase::Failed(message) => TicketList::Failed(message.clone()),
        Phase::Success(_) if state.tickets.is_empty() => TicketList::Empty,
        Phase::Success(_) => TicketList::Rows(state.tickets.iter().map(ticket_row).collect()),
    }
}

pub fn activity_lines(state: &DemoState) -> Vec<ActivityLine> {
    state
        .activity
        .recent(ACTIVITY_VIEW_LIMIT)
        .map(|entry| ActivityLine {
            time: entry.timestamp.format("%H:%M:%S").to_string(),
            level: entry.level,
            message: entry.message.clone(),
        })
        .collect()
}

pub fn project_options(state: &DemoState) -> Vec<SelectOption> {
    state
        .projects
        .iter()
        .map(|project| SelectOption {
            value: project.id.clone(),
            label: project.name.clone(),
        })
        .collect()
}

pub fn user_options(state: &DemoState) -> Vec<SelectOption> {
    state
        .users
        .iter()
        .map(|user| SelectOption {
            value: user.id.clone(),
            label: user.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::ticket::{Page, Priority};
    use crate::error::ApiError;
    use crate::services::fake::sample_ticket;

    #[test]
    fn lists_every_catalog_alert() {
        let cards = alert_cards();
        assert_eq!(cards.len(), catalog::all().len());
        assert_eq!(cards[0].id, "criticalVuln");
        assert_eq!(cards[0].severity, "CRITICAL");
    }

    #[test]
    fn created_panel_shows_server_identifiers() {
        let mut state = DemoState::new();
        state.edit_form(crate::domain::ticket::TicketForm {
            project_id: "p1".to_string(),
            ticket_type: "Task".to_string(),
            name: "Encrypt bucket".to_string(),
            ..Default::default()
        });
        let (token, _) = state.begin_create().unwrap();
        assert_eq!(creation_panel(&state), Some(CreationPanel::Busy));

        let mut ticket = sample_ticket("t1", None);
        ticket.url = Some("https://jira.example/browse/OPS-1".to_string());
        ticket.vendor_attributes = Some(json!({"vendor": "Jira"}));
        state.complete_create(token, Ok(ticket));

        assert_eq!(
            creation_panel(&state),
            Some(CreationPanel::Created {
                id: "t1".to_string(),
                identifier: "N/A".to_string(),
                status: "OPEN",
                link: Some(VendorLink {
                    url: "https://jira.example/browse/OPS-1".to_string(),
                    label: "View in Jira".to_string(),
                }),
            })
        );
    }

    #[test]
    fn ticket_list_reflects_listing_phase() {
        let mut state = DemoState::new();
        assert_eq!(ticket_list(&state), TicketList::NotLoaded);

        let token = state.begin_refresh();
        assert_eq!(ticket_list(&state), TicketList::Loading);
        state.complete_refresh(token, Ok(Page { items: Vec::new() }));
        assert_eq!(ticket_list(&state), TicketList::Empty);

        let mut ticket = sample_ticket("t1", Some("OPS-1"));
        ticket.priority = Some(Priority::Low);
        ticket.description = Some("First line\nSecond line".to_string());
        let token = state.begin_refresh();
        state.complete_refresh(token, Ok(Page { items: vec![ticket] }));
        let TicketList::Rows(rows) = ticket_list(&state) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].key, "OPS-1");
        assert_eq!(rows[0].priority, Some("LOW"));
        assert_eq!(rows[0].summary.as_deref(), Some("First line"));
        assert_eq!(rows[0].link, None);

        let token = state.begin_refresh();
        state.complete_refresh(token, Err(ApiError::Transport));
        assert_eq!(
            ticket_list(&state),
            TicketList::Failed("Network error or server unavailable".to_string())
        );
    }

    #[test]
    fn activity_view_shows_five_most_recent() {
        let mut state = DemoState::new();
        for index in 0..7 {
            state.activity.success(format!("entry {index}"));
        }
        let lines = activity_lines(&state);
        assert_eq!(lines.len(), ACTIVITY_VIEW_LIMIT);
        assert_eq!(lines[0].message, "entry 6");
    }
}
