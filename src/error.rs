use std::io;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid ticket: {0}")]
    InvalidTicket(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

const FALLBACK_MESSAGE: &str = "API request failed";

/// Failure of a single call against the ITSM API.
///
/// `Transport` means no response was received and the call may succeed if
/// repeated. `Status` and `Decode` mean the server answered; repeating the
/// same request will not help.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error or server unavailable")]
    Transport,
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        body: Value,
    },
    #[error("unexpected response body (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = error_message(&body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// HTTP status of the failed call; 0 when nothing came back.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Transport => 0,
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::Status { body, .. } => body.clone(),
            _ => Value::Object(Default::default()),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport)
    }
}

fn error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    ["detail", "message"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            structured => Some(structured.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefers_detail_over_message() {
        let error = ApiError::from_response(
            422,
            json!({"detail": "project_id is required", "message": "bad"}),
        );
        assert_eq!(error.status(), 422);
        assert_eq!(error.message(), "project_id is required");
        assert!(!error.is_transient());
    }

    #[test]
    fn falls_back_to_message_then_generic_text() {
        let error = ApiError::from_response(401, json!({"message": "invalid api key"}));
        assert_eq!(error.message(), "invalid api key");

        let error = ApiError::from_response(500, json!({"detail": ""}));
        assert_eq!(error.message(), "API request failed");

        let error = ApiError::from_response(502, Value::String("<html>".to_string()));
        assert_eq!(error.message(), "API request failed");
        assert_eq!(error.body(), Value::String("<html>".to_string()));
    }

    #[test]
    fn renders_structured_detail_as_json() {
        let error = ApiError::from_response(422, json!({"detail": [{"loc": ["body", "name"]}]}));
        assert_eq!(error.message(), r#"[{"loc":["body","name"]}]"#);
    }

    #[test]
    fn transport_errors_report_status_zero() {
        let error = ApiError::Transport;
        assert_eq!(error.status(), 0);
        assert_eq!(error.message(), "Network error or server unavailable");
        assert_eq!(error.body(), json!({}));
        assert!(error.is_transient());
    }
}
