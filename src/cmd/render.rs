use crate::domain::activity::ActivityLevel;
use crate::domain::ticket::Ticket;
use crate::workflow::state::DemoState;
use crate::workflow::view::{
    self, AlertCard, AlertDetail, CreationPanel, SelectOption, TicketList, TicketRow, VendorLink,
};

pub fn alert_card(card: &AlertCard) {
    println!("[{}] {} ({})", card.severity, card.title, card.category);
    println!("    id: {}", card.id);
    println!("    {}", card.summary);
}

pub fn alert_detail(detail: &AlertDetail) {
    println!("{}", detail.card.title);
    println!("{} | {}", detail.card.severity, detail.card.category);
    println!();
    println!("{}", detail.description);
    println!();
    println!("Suggested ticket details");
    println!("  Type:       {}", detail.suggested_type);
    println!("  Priority:   {}", detail.suggested_priority);
    println!("  Identifier: {}", detail.identifier);
}

fn link_line(link: &Option<VendorLink>) -> Option<String> {
    link.as_ref()
        .map(|link| format!("{}: {}", link.label, link.url))
}

pub fn creation_panel(panel: &CreationPanel) {
    match panel {
        CreationPanel::Busy => println!("Creating ticket..."),
        CreationPanel::Created {
            id,
            identifier,
            status,
            link,
        } => {
            println!("Ticket created successfully!");
            println!("  Leen ID:    {id}");
            println!("  Identifier: {identifier}");
            println!("  Status:     {status}");
            if let Some(line) = link_line(link) {
                println!("  {line}");
            }
        }
        CreationPanel::Failed { message } => {
            eprintln!("Error creating ticket: {message}");
        }
    }
}

fn ticket_row(row: &TicketRow) {
    let priority = row
        .priority
        .map(|priority| format!(" [{priority}]"))
        .unwrap_or_default();
    println!("{} [{}]{} {}", row.key, row.status, priority, row.name);
    if let Some(summary) = &row.summary {
        println!("    {summary}");
    }
    println!("    Type: {}", row.ticket_type);
    if let Some(line) = link_line(&row.link) {
        println!("    {line}");
    }
}

pub fn ticket_list(list: &TicketList) {
    match list {
        TicketList::NotLoaded => {}
        TicketList::Loading => println!("Loading tickets..."),
        TicketList::Empty => println!("No tickets found. Create your first ticket!"),
        TicketList::Failed(message) => eprintln!("Error loading tickets: {message}"),
        TicketList::Rows(rows) => rows.iter().for_each(ticket_row),
    }
}

pub fn ticket(ticket: &Ticket) {
    ticket_row(&view::ticket_row(ticket));
    println!("    Leen ID: {}", ticket.id);
    if !ticket.project_id.is_empty() {
        println!("    Project: {}", ticket.project_id);
    }
    if let Some(description) = &ticket.description {
        println!();
        println!("{description}");
    }
}

pub fn options(title: &str, options: &[SelectOption]) {
    println!("{title} ({})", options.len());
    for option in options {
        println!("  {}  {}", option.value, option.label);
    }
}

pub fn activity(state: &DemoState) {
    if state.activity.is_empty() {
        return;
    }
    let lines = view::activity_lines(state);
    eprintln!();
    eprintln!("Recent activity ({} of {})", lines.len(), state.activity.len());
    for line in lines {
        let marker = match line.level {
            ActivityLevel::Success => "✓",
            ActivityLevel::Error => "✗",
        };
        eprintln!("  {} {marker} {}", line.time, line.message);
    }
}
