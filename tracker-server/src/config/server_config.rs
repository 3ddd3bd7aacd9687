//! Server config: bind address, database, logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "file:./email_tracker.db";
pub const DEFAULT_LOG_FILE: &str = "logs/email-tracker.log";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// Tracking database URL (SQLite file path, `file:` path, or `sqlite:` URL)
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
}

impl ServerConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// A `PORT` that is set but not a valid port number is an error rather than
    /// silently replaced by the default.
    pub fn load() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is set but not a valid port: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            host,
            port,
            database_url,
            log_file,
        })
    }

    /// Applies CLI overrides on top of the env-loaded values.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .or_else(|_| format!("[{}]:{}", self.host, self.port).parse::<SocketAddr>())
            .with_context(|| format!("HOST is not a valid IP address: {}", self.host))
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is set but empty");
        }
        Ok(())
    }
}
