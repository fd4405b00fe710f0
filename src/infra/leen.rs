use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::domain::directory::{Project, User};
use crate::domain::ticket::{Page, Ticket, TicketDraft, TicketUpdate};
use crate::error::{ApiError, ApiResult, AppError, AppResult};
use crate::services::{ItsmService, QueryParams};

const API_KEY_HEADER: &str = "x-api-key";
const CONNECTION_ID_HEADER: &str = "x-connection-id";

const PROJECTS: [&str; 3] = ["v1", "itsm", "projects"];
const USERS: [&str; 3] = ["v1", "itsm", "users"];
const TICKETS: [&str; 3] = ["v1", "itsm", "tickets"];

/// HTTP client for the Leen ITSM API. Every request carries the API key,
/// the connection id and a JSON content type.
pub struct LeenClient {
    http: Client,
    base_url: Url,
}

impl LeenClient {
    pub fn new(credentials: &Credentials) -> AppResult<Self> {
        let base_url = parse_base_url(&credentials.api_base_url)?;

        let mut api_key = header_value("API key", &credentials.api_key)?;
        api_key.set_sensitive(true);
        let connection_id = header_value("connection id", &credentials.connection_id)?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(HeaderName::from_static(CONNECTION_ID_HEADER), connection_id);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str], query: &QueryParams) -> ApiResult<T> {
        let url = self.endpoint(segments);
        debug!(method = "GET", %url, "calling ITSM API");
        let request = self.http.get(url).query(&query.pairs());
        decode(self.execute(request).await?)
    }

    async fn submit<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!(%method, %url, "calling ITSM API");
        let request = self.http.request(method, url).json(body);
        decode(self.execute(request).await?)
    }

    /// Sends the request and returns the status with the parsed JSON body
    /// (`Null` when the body is empty).
    async fn execute(&self, request: RequestBuilder) -> ApiResult<(u16, Value)> {
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "ITSM API unreachable");
            ApiError::Transport
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            warn!(error = %err, "failed to read ITSM API response");
            ApiError::Transport
        })?;

        if !status.is_success() {
            let body = parse_body(&text).unwrap_or(Value::String(text));
            let error = ApiError::from_response(status.as_u16(), body);
            warn!(
                status = status.as_u16(),
                message = %error.message(),
                body = %error.body(),
                "ITSM API returned an error"
            );
            return Err(error);
        }

        let body = parse_body(&text).map_err(|err| ApiError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
        })?;
        Ok((status.as_u16(), body))
    }
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|err| AppError::Configuration(format!("invalid API base URL '{raw}': {err}")))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        _ => Err(AppError::Configuration(format!(
            "API base URL must be an http(s) URL, got '{raw}'"
        ))),
    }
}

fn header_value(field: &str, value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value.trim())
        .map_err(|_| AppError::Configuration(format!("{field} contains characters not allowed in a header")))
}

fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

fn decode<T: DeserializeOwned>((status, body): (u16, Value)) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|err| ApiError::Decode {
        status,
        message: err.to_string(),
    })
}

fn ticket_path(ticket_id: &str) -> [&str; 4] {
    [TICKETS[0], TICKETS[1], TICKETS[2], ticket_id]
}

#[async_trait]
impl ItsmService for LeenClient {
    async fn list_projects(&self, query: &QueryParams) -> ApiResult<Page<Project>> {
        self.fetch(&PROJECTS, query).await
    }

    async fn list_users(&self, query: &QueryParams) -> ApiResult<Page<User>> {
        self.fetch(&USERS, query).await
    }

    async fn list_tickets(&self, query: &QueryParams) -> ApiResult<Page<Ticket>> {
        self.fetch(&TICKETS, query).await
    }

    async fn get_ticket(&self, ticket_id: &str) -> ApiResult<Ticket> {
        self.fetch(&ticket_path(ticket_id), &QueryParams::new()).await
    }

    async fn get_ticket_by_identifier(&self, identifier: &str) -> ApiResult<Ticket> {
        let segments = [TICKETS[0], TICKETS[1], TICKETS[2], "by-identifier", identifier];
        self.fetch(&segments, &QueryParams::new()).await
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> ApiResult<Ticket> {
        self.submit(Method::POST, &TICKETS, draft).await
    }

    async fn update_ticket(&self, ticket_id: &str, update: &TicketUpdate) -> ApiResult<Ticket> {
        self.submit(Method::PATCH, &ticket_path(ticket_id), update).await
    }
}
