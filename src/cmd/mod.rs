pub mod alerts;
pub mod config;
pub mod directory;
pub mod docs;
pub mod render;
pub mod status;
pub mod tickets;

/// How a command ended when it did not hit an error outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The failure has already been shown to the user.
    Failed,
}
