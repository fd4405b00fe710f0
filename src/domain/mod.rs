pub mod activity;
pub mod alert;
pub mod directory;
pub mod ticket;
