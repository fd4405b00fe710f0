pub mod itsm;
#[cfg(test)]
pub mod fake;

pub use itsm::{ItsmService, QueryParams};
