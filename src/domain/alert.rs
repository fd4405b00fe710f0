use crate::domain::ticket::{Priority, TicketType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// A canned security finding that can be turned into a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTemplate {
    pub id: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    /// Markdown-formatted body.
    pub description: &'static str,
    pub suggested_type: TicketType,
    pub suggested_priority: Priority,
    pub identifier: &'static str,
}

impl AlertTemplate {
    /// First line of the description, used as a card teaser.
    pub fn summary_line(&self) -> &'static str {
        self.description.lines().next().unwrap_or_default()
    }
}
