use std::sync::Arc;

use tracing::info;

use crate::config::Credentials;
use crate::error::{ApiError, AppResult};
use crate::services::{ItsmService, QueryParams};

pub enum Session {
    /// Credentials are missing or incomplete; the user has to set them up.
    NeedsConfiguration,
    Connected(Arc<dyn ItsmService>),
    ConnectionFailed(ApiError),
}

/// Builds a service from the credentials and checks that it answers.
///
/// Incomplete credentials never reach `build`, so no request is made
/// before the user has configured the client.
pub async fn connect<F>(credentials: Option<&Credentials>, build: F) -> AppResult<Session>
where
    F: FnOnce(&Credentials) -> AppResult<Arc<dyn ItsmService>>,
{
    let Some(credentials) = credentials.filter(|credentials| credentials.is_complete()) else {
        info!("credentials not configured");
        return Ok(Session::NeedsConfiguration);
    };

    let service = build(credentials)?;
    match service.list_projects(&QueryParams::with_limit(1)).await {
        Ok(_) => Ok(Session::Connected(service)),
        Err(error) => Ok(Session::ConnectionFailed(error)),
    }
}
