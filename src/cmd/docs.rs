use crate::cmd::Outcome;
use crate::domain::ticket::{Priority, TicketStatus, TicketType};

const ENDPOINTS: [(&str, &str, &str); 7] = [
    ("GET", "/v1/itsm/projects", "List projects"),
    ("GET", "/v1/itsm/users", "List users"),
    ("GET", "/v1/itsm/tickets", "List tickets"),
    ("GET", "/v1/itsm/tickets/{id}", "Get ticket by ID"),
    (
        "GET",
        "/v1/itsm/tickets/by-identifier/{identifier}",
        "Get ticket by identifier",
    ),
    ("POST", "/v1/itsm/tickets", "Create a new ticket"),
    ("PATCH", "/v1/itsm/tickets/{id}", "Update a ticket"),
];

pub fn run() -> Outcome {
    println!("API reference");
    println!();
    println!("Endpoints");
    for (method, path, summary) in ENDPOINTS {
        println!("  {method:<6} {path:<45} {summary}");
    }
    println!();
    println!("Authentication headers");
    println!("  X-API-KEY: your-api-key");
    println!("  X-CONNECTION-ID: your-connection-id");
    println!("  Content-Type: application/json");
    println!();
    println!("Valid values");
    println!("  Status:   {}", join(TicketStatus::ALL.iter().map(|v| v.as_str())));
    println!("  Priority: {}", join(Priority::ALL.iter().map(|v| v.as_str())));
    println!("  Type:     {}", join(TicketType::ALL.iter().map(|v| v.as_str())));
    Outcome::Done
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
