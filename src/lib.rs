pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod workflow;
