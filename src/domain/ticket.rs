use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::alert::AlertTemplate;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketType {
    Bug,
    Task,
    Story,
    Epic,
    /// Any type the backend reports that this client does not know.
    #[serde(other)]
    Unknown,
}

impl TicketType {
    pub const ALL: [TicketType; 4] = [
        TicketType::Bug,
        TicketType::Task,
        TicketType::Story,
        TicketType::Epic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Bug => "Bug",
            TicketType::Task => "Task",
            TicketType::Story => "Story",
            TicketType::Epic => "Epic",
            TicketType::Unknown => "Unknown",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "bug" => Some(TicketType::Bug),
            "task" => Some(TicketType::Task),
            "story" => Some(TicketType::Story),
            "epic" => Some(TicketType::Epic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Informational,
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Informational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::Informational => "INFORMATIONAL",
            Priority::Unknown => "UNKNOWN",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "CRITICAL" => Some(Priority::Critical),
            "HIGH" => Some(Priority::High),
            "MEDIUM" => Some(Priority::Medium),
            "LOW" => Some(Priority::Low),
            "INFORMATIONAL" => Some(Priority::Informational),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Todo,
    InProgress,
    InReview,
    Resolved,
    Closed,
    /// Any status the backend reports that this client does not know.
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 6] = [
        TicketStatus::Open,
        TicketStatus::Todo,
        TicketStatus::InProgress,
        TicketStatus::InReview,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::Todo => "TODO",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::InReview => "IN_REVIEW",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
            TicketStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let normalized = value.trim().to_uppercase().replace(['-', ' '], "_");
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

/// Raw contents of the ticket form. Every field is free text and may be
/// blank; [`TicketForm::to_draft`] turns it into a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    pub project_id: String,
    pub ticket_type: String,
    pub name: String,
    pub description: String,
    pub priority: String,
    pub assigned_user_id: String,
    pub identifier: String,
}

impl TicketForm {
    /// Form prefilled from an alert. The project and assignee stay blank.
    pub fn from_alert(alert: &AlertTemplate) -> Self {
        Self::from_draft(&TicketDraft::from_alert(alert, String::new()))
    }

    pub fn from_draft(draft: &TicketDraft) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            project_id: draft.project_id.clone(),
            ticket_type: draft.ticket_type.as_str().to_string(),
            name: draft.name.clone(),
            description: text(&draft.description),
            priority: draft
                .priority
                .map(|priority| priority.as_str().to_string())
                .unwrap_or_default(),
            assigned_user_id: text(&draft.assigned_user_id),
            identifier: text(&draft.identifier),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_draft(&self) -> AppResult<TicketDraft> {
        let project_id = required(&self.project_id, "project_id")?;
        let name = required(&self.name, "name")?;
        let type_value = required(&self.ticket_type, "type")?;
        let ticket_type = TicketType::from_str(&type_value).ok_or_else(|| {
            AppError::InvalidTicket(format!("unknown ticket type '{type_value}'"))
        })?;
        let priority = match optional(&self.priority) {
            Some(value) => Some(Priority::from_str(&value).ok_or_else(|| {
                AppError::InvalidTicket(format!("unknown priority '{value}'"))
            })?),
            None => None,
        };

        Ok(TicketDraft {
            project_id,
            ticket_type,
            name,
            description: optional(&self.description),
            priority,
            assigned_user_id: optional(&self.assigned_user_id),
            identifier: optional(&self.identifier),
        })
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    optional(value).ok_or_else(|| AppError::InvalidTicket(format!("{field} is required")))
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Body of a create-ticket request. Unset optional fields are left out of
/// the JSON so the backend applies its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDraft {
    pub project_id: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl TicketDraft {
    pub fn from_alert(alert: &AlertTemplate, project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ticket_type: alert.suggested_type,
            name: alert.title.to_string(),
            description: Some(alert.description.to_string()),
            priority: Some(alert.suggested_priority),
            assigned_user_id: None,
            identifier: Some(alert.identifier.to_string()),
        }
    }
}

/// Body of a PATCH request; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    #[serde(default)]
    pub identifier: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub vendor_attributes: Option<Value>,
}

impl Ticket {
    pub fn display_key(&self) -> &str {
        self.identifier
            .as_deref()
            .filter(|identifier| !identifier.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn vendor_name(&self) -> &str {
        self.vendor_attributes
            .as_ref()
            .and_then(|attributes| attributes.get("vendor"))
            .and_then(Value::as_str)
            .unwrap_or("ITSM")
    }
}

/// One page of a list endpoint. A body without `items` is an empty page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
