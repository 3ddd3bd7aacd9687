//! Config tests.

use crate::config::{ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
use serial_test::serial;
use std::env;

fn clear_env() {
    env::remove_var("HOST");
    env::remove_var("PORT");
    env::remove_var("DATABASE_URL");
    env::remove_var("LOG_FILE");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();

    let config = ServerConfig::load().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("HOST", "127.0.0.1");
    env::set_var("PORT", "8080");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("LOG_FILE", "/tmp/tracker.log");

    let config = ServerConfig::load().unwrap();

    assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.log_file, "/tmp/tracker.log");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("PORT", "not-a-port");

    assert!(ServerConfig::load().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides() {
    clear_env();

    let config = ServerConfig::load()
        .unwrap()
        .with_overrides(Some("::1".to_string()), Some(9000));

    assert_eq!(config.bind_addr().unwrap().to_string(), "[::1]:9000");
}

#[test]
#[serial]
fn test_validate_invalid_host() {
    clear_env();
    env::set_var("HOST", "not a host");

    let config = ServerConfig::load().unwrap();
    assert!(config.validate().is_err());

    clear_env();
}
