use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::directory::{Project, User};
use crate::domain::ticket::{Page, Ticket, TicketDraft, TicketStatus, TicketType, TicketUpdate};
use crate::error::{ApiError, ApiResult};
use crate::services::{ItsmService, QueryParams};

/// In-memory `ItsmService` with canned answers that records every call.
pub struct FakeItsm {
    pub projects: ApiResult<Vec<Project>>,
    pub users: ApiResult<Vec<User>>,
    pub tickets: ApiResult<Vec<Ticket>>,
    pub created: ApiResult<Ticket>,
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) drafts: Mutex<Vec<TicketDraft>>,
}

impl Default for FakeItsm {
    fn default() -> Self {
        Self {
            projects: Ok(Vec::new()),
            users: Ok(Vec::new()),
            tickets: Ok(Vec::new()),
            created: Ok(sample_ticket("t1", Some("OPS-1"))),
            calls: Mutex::new(Vec::new()),
            drafts: Mutex::new(Vec::new()),
        }
    }
}

impl FakeItsm {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn drafts(&self) -> Vec<TicketDraft> {
        self.drafts.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

pub fn sample_ticket(id: &str, identifier: Option<&str>) -> Ticket {
    Ticket {
        id: id.to_string(),
        identifier: identifier.map(str::to_string),
        name: "Sample ticket".to_string(),
        ticket_type: TicketType::Task,
        status: TicketStatus::Open,
        priority: None,
        description: None,
        project_id: "p1".to_string(),
        url: None,
        vendor_attributes: None,
    }
}

fn page<T: Clone>(result: &ApiResult<Vec<T>>) -> ApiResult<Page<T>> {
    result.clone().map(|items| Page { items })
}

#[async_trait]
impl ItsmService for FakeItsm {
    async fn list_projects(&self, query: &QueryParams) -> ApiResult<Page<Project>> {
        self.record(format!("list_projects {:?}", query.pairs()));
        page(&self.projects)
    }

    async fn list_users(&self, query: &QueryParams) -> ApiResult<Page<User>> {
        self.record(format!("list_users {:?}", query.pairs()));
        page(&self.users)
    }

    async fn list_tickets(&self, query: &QueryParams) -> ApiResult<Page<Ticket>> {
        self.record(format!("list_tickets {:?}", query.pairs()));
        page(&self.tickets)
    }

    async fn get_ticket(&self, ticket_id: &str) -> ApiResult<Ticket> {
        self.record(format!("get_ticket {ticket_id}"));
        self.tickets
            .clone()?
            .into_iter()
            .find(|ticket| ticket.id == ticket_id)
            .ok_or_else(|| ApiError::from_response(404, serde_json::json!({"detail": "Not found"})))
    }

    async fn get_ticket_by_identifier(&self, identifier: &str) -> ApiResult<Ticket> {
        self.record(format!("get_ticket_by_identifier {identifier}"));
        self.tickets
            .clone()?
            .into_iter()
            .find(|ticket| ticket.identifier.as_deref() == Some(identifier))
            .ok_or_else(|| ApiError::from_response(404, serde_json::json!({"detail": "Not found"})))
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> ApiResult<Ticket> {
        self.record("create_ticket");
        self.drafts.lock().unwrap().push(draft.clone());
        self.created.clone()
    }

    async fn update_ticket(&self, ticket_id: &str, _update: &TicketUpdate) -> ApiResult<Ticket> {
        self.record(format!("update_ticket {ticket_id}"));
        self.get_ticket(ticket_id).await
    }
}
