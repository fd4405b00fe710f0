use crate::catalog;
use crate::domain::activity::ActivityLog;
use crate::domain::alert::AlertTemplate;
use crate::domain::directory::{Project, User};
use crate::domain::ticket::{Page, Ticket, TicketDraft, TicketForm};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Alerts,
    Create,
    Manage,
}

/// Identifies one in-flight request. Tokens only grow, so a completion
/// carrying anything but the pending token belongs to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Lifecycle of one user-initiated action.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading(RequestToken),
    Success(T),
    Failed(String),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Phase::Idle
    }
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading(_))
    }

    fn is_pending(&self, token: RequestToken) -> bool {
        matches!(self, Phase::Loading(pending) if *pending == token)
    }
}

/// Everything the demo shows. Mutated only through the methods below; the
/// async controller performs the requests in between `begin_*` and
/// `complete_*`.
#[derive(Debug, Default)]
pub struct DemoState {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub tickets: Vec<Ticket>,
    pub selected_alert: Option<&'static AlertTemplate>,
    pub active_tab: Tab,
    pub form: TicketForm,
    pub initialization: Phase<()>,
    pub creation: Phase<Ticket>,
    pub listing: Phase<usize>,
    pub activity: ActivityLog,
    last_token: u64,
}

impl DemoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.initialization.is_loading() || self.creation.is_loading() || self.listing.is_loading()
    }

    fn issue_token(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Selects a catalog alert; an unknown id clears the selection.
    pub fn select_alert(&mut self, alert_id: &str) -> Option<&'static AlertTemplate> {
        self.selected_alert = catalog::find(alert_id);
        self.selected_alert
    }

    /// Copies the selected alert into a fresh form and opens the create tab.
    /// Returns false when nothing is selected.
    pub fn prefill_from_selected_alert(&mut self) -> bool {
        let Some(alert) = self.selected_alert else {
            return false;
        };
        self.form = TicketForm::from_alert(alert);
        self.creation = Phase::Idle;
        self.switch_tab(Tab::Create);
        true
    }

    pub fn edit_form(&mut self, form: TicketForm) {
        self.form = form;
    }

    pub fn clear_form(&mut self) {
        self.form = TicketForm::default();
    }

    pub fn begin_initialize(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.initialization = Phase::Loading(token);
        token
    }

    pub fn apply_projects(&mut self, result: ApiResult<Page<Project>>) {
        match result {
            Ok(page) => {
                self.projects = page.items;
                self.activity
                    .success(format!("Loaded {} projects", self.projects.len()));
            }
            Err(error) => {
                self.projects.clear();
                self.activity
                    .error(format!("Failed to load projects: {}", error.message()));
            }
        }
    }

    pub fn apply_users(&mut self, result: ApiResult<Page<User>>) {
        match result {
            Ok(page) => {
                self.users = page.items;
                self.activity
                    .success(format!("Loaded {} users", self.users.len()));
            }
            Err(error) => {
                self.users.clear();
                self.activity
                    .error(format!("Failed to load users: {}", error.message()));
            }
        }
    }

    pub fn finish_initialize(&mut self, token: RequestToken) {
        if self.initialization.is_pending(token) {
            self.initialization = Phase::Success(());
            self.switch_tab(Tab::Alerts);
        }
    }

    /// Validates the form and enters Loading. An invalid form fails the
    /// action on the spot and returns `None`; the form is left as entered.
    pub fn begin_create(&mut self) -> Option<(RequestToken, TicketDraft)> {
        match self.form.to_draft() {
            Ok(draft) => {
                let token = self.issue_token();
                self.creation = Phase::Loading(token);
                Some((token, draft))
            }
            Err(error) => {
                let message = error.to_string();
                self.activity
                    .error(format!("Failed to create ticket: {message}"));
                self.creation = Phase::Failed(message);
                None
            }
        }
    }

    /// Applies the outcome of a create request. Returns false, changing
    /// nothing, when the request has been superseded.
    pub fn complete_create(&mut self, token: RequestToken, result: ApiResult<Ticket>) -> bool {
        if !self.creation.is_pending(token) {
            return false;
        }
        match result {
            Ok(ticket) => {
                self.activity
                    .success(format!("Created ticket: {}", ticket.display_key()));
                self.creation = Phase::Success(ticket);
                self.clear_form();
            }
            Err(error) => {
                let message = error.message();
                self.activity
                    .error(format!("Failed to create ticket: {message}"));
                self.creation = Phase::Failed(message);
            }
        }
        true
    }

    pub fn begin_refresh(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.listing = Phase::Loading(token);
        token
    }

    /// Replaces the cached tickets wholesale. Returns false, changing
    /// nothing, when a newer refresh has been started since.
    pub fn complete_refresh(&mut self, token: RequestToken, result: ApiResult<Page<Ticket>>) -> bool {
        if !self.listing.is_pending(token) {
            return false;
        }
        match result {
            Ok(page) => {
                self.tickets = page.items;
                self.activity
                    .success(format!("Loaded {} tickets", self.tickets.len()));
                self.listing = Phase::Success(self.tickets.len());
            }
            Err(error) => {
                let message = error.message();
                self.tickets.clear();
                self.activity
                    .error(format!("Failed to load tickets: {message}"));
                self.listing = Phase::Failed(message);
            }
        }
        true
    }
}
