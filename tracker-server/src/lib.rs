//! # Email tracker server
//!
//! Wires storage and tracker-core into an axum HTTP API: pixel generation,
//! pixel serving with open logging, and the tracking record endpoints.
//! Loads config from env and runs the server or a maintenance command.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod runner;
pub mod state;

pub use cli::{load_config, Cli, Commands};
pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build_router;
pub use runner::run_server;
pub use state::{AppState, LIST_LIMIT};
