//! Configuration Loading Tests
//!
//! These tests mutate the process environment, so they run serially.

use serial_test::serial;
use std::fs;
use tempfile::TempDir;

use vapi_webhook::ServerConfig;

const VARS: &[&str] = &[
    "HOST",
    "PORT",
    "TLS_ENABLED",
    "TLS_CERT_PATH",
    "TLS_KEY_PATH",
    "VAPI_SECRET",
    "CORS_ALLOWED_ORIGINS",
    "MAX_CALLS",
    "MAX_CONVERSATIONS",
    "MAX_ASSISTANTS",
    "MAX_LOG_SESSIONS",
];

fn clear_env() {
    for var in VARS {
        // SAFETY: tests in this file are serialized with #[serial]
        unsafe { std::env::remove_var(var) };
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: tests in this file are serialized with #[serial]
    unsafe { std::env::set_var(key, value) };
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.address(), "0.0.0.0:3000");
    assert!(!config.has_webhook_secret());
    assert_eq!(config.history.calls, 100);
    assert_eq!(config.history.log_sessions, 20);
}

#[test]
#[serial]
fn test_from_env_reads_secret_and_limits() {
    clear_env();
    set_env("VAPI_SECRET", "env-secret");
    set_env("PORT", "4000");
    set_env("MAX_LOG_SESSIONS", "5");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.has_webhook_secret());
    assert_eq!(config.vapi_secret.as_deref(), Some("env-secret"));
    assert_eq!(config.port, 4000);
    assert_eq!(config.history.log_sessions, 5);
}

#[test]
#[serial]
fn test_from_env_rejects_zero_capacity() {
    clear_env();
    set_env("MAX_CALLS", "0");

    let result = ServerConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("MAX_CALLS"));
}

#[test]
#[serial]
fn test_from_file_overrides_env() {
    clear_env();
    set_env("VAPI_SECRET", "env-secret");
    set_env("PORT", "4000");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "server:\n  port: 5000\nwebhook:\n  secret: yaml-secret\nhistory:\n  max_assistants: 12\n",
    )
    .unwrap();

    let config = ServerConfig::from_file(&path).unwrap();
    clear_env();

    assert_eq!(config.port, 5000);
    assert_eq!(config.vapi_secret.as_deref(), Some("yaml-secret"));
    assert_eq!(config.history.assistants, 12);
    assert_eq!(config.history.calls, 100);
}
