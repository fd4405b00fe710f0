use std::sync::Arc;

use crate::config::{AppConfig, Credentials};
use crate::error::{AppError, AppResult};
use crate::infra::leen::LeenClient;
use crate::services::ItsmService;

pub const SETUP_HINT: &str = "run `itsm-demo config init` to set up your API credentials";

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub itsm: Arc<dyn ItsmService>,
}

impl AppContext {
    pub fn new(config: AppConfig, itsm: Arc<dyn ItsmService>) -> Self {
        Self { config, itsm }
    }

    /// Wires the HTTP client without testing the connection. Missing or
    /// incomplete credentials fail before any request is attempted.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let credentials = config
            .credentials
            .as_ref()
            .filter(|credentials| credentials.is_complete())
            .ok_or_else(|| AppError::Configuration(format!("credentials missing; {SETUP_HINT}")))?;
        let itsm = build_service(credentials)?;
        Ok(Self::new(config, itsm))
    }
}

pub fn build_service(credentials: &Credentials) -> AppResult<Arc<dyn ItsmService>> {
    Ok(Arc::new(LeenClient::new(credentials)?))
}
