pub mod connection;
pub mod migrations;
pub mod mood_log_repo;

pub use connection::*;
