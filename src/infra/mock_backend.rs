//! In-process HTTP backend for exercising the real client in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::http::StatusCode;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockBackend {
    pub fn route(&self, method: &str, path: &str, status: u16, body: impl ToString) -> &Self {
        self.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    pub fn last(&self) -> SeenRequest {
        self.seen.lock().unwrap().last().cloned().expect("a request")
    }

    pub async fn start(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }
}

async fn handle(State(backend): State<MockBackend>, request: Request) -> (StatusCode, String) {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    backend.seen.lock().unwrap().push(SeenRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    });

    let key = (parts.method.to_string(), parts.uri.path().to_string());
    match backend.routes.lock().unwrap().get(&key).cloned() {
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), body),
        None => (StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#.to_string()),
    }
}
