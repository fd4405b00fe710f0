use crate::cmd::{Outcome, render};
use crate::config::AppConfig;
use crate::context::{SETUP_HINT, build_service};
use crate::error::AppResult;
use crate::workflow::controller::{Command, DemoController};
use crate::workflow::session::{self, Session};
use crate::workflow::view;

/// Tests the connection, then loads projects and users the way the demo
/// does on start-up.
pub async fn run(config: &AppConfig) -> AppResult<Outcome> {
    println!("Testing connection...");
    let service = match session::connect(config.credentials.as_ref(), build_service).await? {
        Session::NeedsConfiguration => {
            eprintln!("No API credentials configured; {SETUP_HINT}.");
            return Ok(Outcome::Failed);
        }
        Session::ConnectionFailed(error) => {
            eprintln!("✗ Connection failed: {}", error.message());
            if error.is_transient() {
                eprintln!("The server could not be reached; it may be temporarily unavailable.");
            }
            eprintln!("Check your credentials and run `itsm-demo config init` to try again.");
            return Ok(Outcome::Failed);
        }
        Session::Connected(service) => service,
    };
    println!("✓ Connected");
    println!();

    let mut controller = DemoController::new(service);
    controller.dispatch(Command::Initialize).await;

    let state = controller.state();
    render::options("Projects", &view::project_options(state));
    render::options("Users", &view::user_options(state));
    render::activity(state);
    Ok(Outcome::Done)
}
