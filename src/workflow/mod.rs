pub mod controller;
pub mod session;
pub mod state;
pub mod view;
