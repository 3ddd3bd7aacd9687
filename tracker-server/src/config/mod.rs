//! Server configuration loaded from environment variables.

mod server_config;

#[cfg(test)]
mod tests;

pub use server_config::{
    ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_LOG_FILE, DEFAULT_PORT,
};
