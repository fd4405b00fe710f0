use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ticket::TicketForm;
use crate::services::{ItsmService, QueryParams};
use crate::workflow::state::{DemoState, Tab};

pub const DIRECTORY_PAGE_SIZE: u32 = 100;
pub const TICKET_PAGE_SIZE: u32 = 20;

/// A user gesture, as the demo understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Initialize,
    SwitchTab(Tab),
    SelectAlert(String),
    CreateFromAlert,
    EditForm(TicketForm),
    SubmitTicket,
}

pub struct DemoController {
    itsm: Arc<dyn ItsmService>,
    state: DemoState,
}

impl DemoController {
    pub fn new(itsm: Arc<dyn ItsmService>) -> Self {
        Self {
            itsm,
            state: DemoState::new(),
        }
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }

    pub async fn dispatch(&mut self, command: Command) {
        debug!(?command, busy = self.state.is_busy(), "dispatching");
        match command {
            Command::Initialize => self.initialize().await,
            Command::SwitchTab(tab) => {
                self.state.switch_tab(tab);
                if tab == Tab::Manage {
                    self.refresh_tickets().await;
                }
            }
            Command::SelectAlert(alert_id) => {
                if self.state.select_alert(&alert_id).is_none() {
                    debug!(%alert_id, "no such alert template");
                }
            }
            Command::CreateFromAlert => {
                self.state.prefill_from_selected_alert();
            }
            Command::EditForm(form) => self.state.edit_form(form),
            Command::SubmitTicket => self.submit_ticket().await,
        }
    }

    /// Loads projects and users side by side; either may fail without
    /// affecting the other.
    async fn initialize(&mut self) {
        let token = self.state.begin_initialize();
        let query = QueryParams::with_limit(DIRECTORY_PAGE_SIZE);

        let (projects, users) = tokio::join!(
            self.itsm.list_projects(&query),
            self.itsm.list_users(&query)
        );

        self.state.apply_projects(projects);
        self.state.apply_users(users);
        self.state.finish_initialize(token);
        info!(
            projects = self.state.projects.len(),
            users = self.state.users.len(),
            "demo initialized"
        );
    }

    async fn submit_ticket(&mut self) {
        let Some((token, draft)) = self.state.begin_create() else {
            return;
        };

        let result = self.itsm.create_ticket(&draft).await;
        match &result {
            Ok(ticket) => info!(id = %ticket.id, key = ticket.display_key(), "ticket created"),
            Err(error) => info!(status = error.status(), message = %error, "ticket creation failed"),
        }
        self.state.complete_create(token, result);
    }

    async fn refresh_tickets(&mut self) {
        let token = self.state.begin_refresh();
        let result = self
            .itsm
            .list_tickets(&QueryParams::with_limit(TICKET_PAGE_SIZE))
            .await;
        if !self.state.complete_refresh(token, result) {
            debug!("discarded stale ticket list");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog;
    use crate::config::Credentials;
    use crate::domain::activity::ActivityLevel;
    use crate::domain::directory::{Project, User};
    use crate::domain::ticket::{Priority, TicketType};
    use crate::error::ApiError;
    use crate::infra::leen::LeenClient;
    use crate::infra::mock_backend::MockBackend;
    use crate::services::fake::{FakeItsm, sample_ticket};
    use crate::workflow::state::Phase;

    fn controller(fake: FakeItsm) -> (DemoController, Arc<FakeItsm>) {
        let fake = Arc::new(fake);
        (DemoController::new(fake.clone()), fake)
    }

    fn leen_controller(base_url: &str) -> DemoController {
        let credentials = Credentials::new("k1", "c1", base_url);
        DemoController::new(Arc::new(LeenClient::new(&credentials).unwrap()))
    }

    fn filled_form() -> TicketForm {
        TicketForm {
            project_id: "p1".to_string(),
            ticket_type: "Bug".to_string(),
            name: "Patch log4j".to_string(),
            priority: "CRITICAL".to_string(),
            ..TicketForm::default()
        }
    }

    #[tokio::test]
    async fn initialize_loads_projects_and_users() {
        let (mut controller, fake) = controller(FakeItsm {
            projects: Ok(vec![Project {
                id: "p1".to_string(),
                name: "Proj".to_string(),
            }]),
            users: Ok(vec![User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: None,
            }]),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::Initialize).await;

        let state = controller.state();
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.initialization, Phase::Success(()));
        assert_eq!(state.active_tab, Tab::Alerts);
        assert_eq!(
            fake.calls(),
            vec![
                "list_projects [(\"limit\", \"100\")]",
                "list_users [(\"limit\", \"100\")]"
            ]
        );
    }

    #[tokio::test]
    async fn one_failed_load_does_not_block_the_other() {
        let (mut controller, _) = controller(FakeItsm {
            projects: Err(ApiError::from_response(403, json!({"detail": "forbidden"}))),
            users: Ok(vec![User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: None,
            }]),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::Initialize).await;

        let state = controller.state();
        assert!(state.projects.is_empty());
        assert_eq!(state.users.len(), 1);
        let messages: Vec<_> = state.activity.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Loaded 1 users", "Failed to load projects: forbidden"]
        );
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn successful_submit_clears_form() {
        let (mut controller, fake) = controller(FakeItsm {
            created: Ok(sample_ticket("t9", Some("VULN-1"))),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::EditForm(filled_form())).await;
        controller.dispatch(Command::SubmitTicket).await;

        let state = controller.state();
        assert!(state.form.is_empty());
        assert!(matches!(&state.creation, Phase::Success(ticket) if ticket.id == "t9"));
        assert_eq!(state.activity.latest().unwrap().message, "Created ticket: VULN-1");
        assert_eq!(fake.drafts().len(), 1);
        assert_eq!(fake.drafts()[0].description, None);
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_for_correction() {
        let (mut controller, _) = controller(FakeItsm {
            created: Err(ApiError::from_response(
                422,
                json!({"detail": "project_id is required"}),
            )),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::EditForm(filled_form())).await;
        controller.dispatch(Command::SubmitTicket).await;

        let state = controller.state();
        assert_eq!(state.form, filled_form());
        assert_eq!(
            state.creation,
            Phase::Failed("project_id is required".to_string())
        );
        let latest = state.activity.latest().unwrap();
        assert_eq!(latest.level, ActivityLevel::Error);
        assert_eq!(latest.message, "Failed to create ticket: project_id is required");
    }

    #[tokio::test]
    async fn create_from_alert_prefills_and_opens_create_tab() {
        let (mut controller, fake) = controller(FakeItsm::default());

        controller
            .dispatch(Command::SelectAlert("criticalVuln".to_string()))
            .await;
        controller.dispatch(Command::CreateFromAlert).await;

        let alert = catalog::find("criticalVuln").unwrap();
        let state = controller.state();
        assert_eq!(state.active_tab, Tab::Create);
        assert_eq!(state.form, TicketForm::from_alert(alert));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn list_failure_leaves_cache_empty_with_one_error() {
        let (mut controller, _) = controller(FakeItsm {
            tickets: Err(ApiError::Transport),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::SwitchTab(Tab::Manage)).await;

        let state = controller.state();
        assert!(state.tickets.is_empty());
        assert_eq!(state.activity.len(), 1);
        assert_eq!(
            state.activity.latest().unwrap().message,
            "Failed to load tickets: Network error or server unavailable"
        );
    }

    #[tokio::test]
    async fn refresh_replaces_tickets_wholesale() {
        let (mut controller, fake) = controller(FakeItsm {
            tickets: Ok(vec![sample_ticket("t1", None), sample_ticket("t2", None)]),
            ..FakeItsm::default()
        });

        controller.dispatch(Command::SwitchTab(Tab::Manage)).await;
        controller.dispatch(Command::SwitchTab(Tab::Manage)).await;

        let state = controller.state();
        assert_eq!(state.tickets.len(), 2);
        assert_eq!(state.listing, Phase::Success(2));
        assert_eq!(fake.calls()[0], "list_tickets [(\"limit\", \"20\")]");
    }

    #[tokio::test]
    async fn initialize_over_http_caches_the_project_page() {
        let backend = MockBackend::default();
        backend.route(
            "GET",
            "/v1/itsm/projects",
            200,
            json!({"items": [{"id": "p1", "name": "Proj"}]}),
        );
        let base_url = backend.start().await;
        let mut controller = leen_controller(&base_url);

        controller.dispatch(Command::Initialize).await;

        let state = controller.state();
        assert_eq!(
            state.projects,
            vec![Project {
                id: "p1".to_string(),
                name: "Proj".to_string(),
            }]
        );
        let project_entries: Vec<_> = state
            .activity
            .iter()
            .filter(|entry| entry.message.contains("projects"))
            .collect();
        assert_eq!(project_entries.len(), 1);
        assert_eq!(project_entries[0].level, ActivityLevel::Success);
        assert_eq!(project_entries[0].message, "Loaded 1 projects");
        assert_eq!(backend.last().headers["x-api-key"], "k1");
        assert_eq!(backend.last().headers["x-connection-id"], "c1");
    }

    #[tokio::test]
    async fn created_ticket_with_unfamiliar_enums_still_succeeds() {
        let backend = MockBackend::default();
        backend.route(
            "POST",
            "/v1/itsm/tickets",
            201,
            json!({
                "id": "t42",
                "identifier": "INC-42",
                "name": "Patch log4j",
                "type": "Incident",
                "status": "NEW",
                "priority": "P1",
                "project_id": "p1"
            }),
        );
        let base_url = backend.start().await;
        let mut controller = leen_controller(&base_url);

        controller.dispatch(Command::EditForm(filled_form())).await;
        controller.dispatch(Command::SubmitTicket).await;

        let state = controller.state();
        let Phase::Success(ticket) = &state.creation else {
            panic!("expected success, got {:?}", state.creation);
        };
        assert_eq!(ticket.priority, Some(Priority::Unknown));
        assert_eq!(ticket.ticket_type, TicketType::Unknown);
        assert!(state.form.is_empty());
        let latest = state.activity.latest().unwrap();
        assert_eq!(latest.level, ActivityLevel::Success);
        assert_eq!(latest.message, "Created ticket: INC-42");
        assert_eq!(backend.last().method, "POST");
    }
}
