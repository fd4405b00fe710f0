use async_trait::async_trait;

use crate::domain::directory::{Project, User};
use crate::domain::ticket::{Page, Ticket, TicketDraft, TicketUpdate};
use crate::error::ApiResult;

/// Query string for list endpoints. Parameters set to `None` are dropped
/// before the request is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: u32) -> Self {
        Self::new().param("limit", Some(limit))
    }

    pub fn param(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params
            .push((key.into(), value.map(|value| value.to_string())));
        self
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
            .collect()
    }
}

#[async_trait]
pub trait ItsmService: Send + Sync {
    async fn list_projects(&self, query: &QueryParams) -> ApiResult<Page<Project>>;
    async fn list_users(&self, query: &QueryParams) -> ApiResult<Page<User>>;
    async fn list_tickets(&self, query: &QueryParams) -> ApiResult<Page<Ticket>>;
    async fn get_ticket(&self, ticket_id: &str) -> ApiResult<Ticket>;
    async fn get_ticket_by_identifier(&self, identifier: &str) -> ApiResult<Ticket>;
    async fn create_ticket(&self, draft: &TicketDraft) -> ApiResult<Ticket>;
    async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> ApiResult<Ticket>;
}
