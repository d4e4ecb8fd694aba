//! Environment variable loading and YAML merge
//!
//! Environment variables form the base configuration (with defaults); any
//! value present in the YAML file overrides them. The environment is read
//! through a lookup function so the merge logic can be tested without
//! touching the process environment.

use std::path::PathBuf;

use super::yaml::YamlConfig;
use super::{ServerConfig, TlsConfig};
use crate::store::HistoryLimits;

pub(super) const DEFAULT_HOST: &str = "0.0.0.0";
pub(super) const DEFAULT_PORT: u16 = 3000;

/// Lookup against the real process environment
pub(super) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_env<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} ({raw:?}): {e}")),
        _ => Ok(None),
    }
}

fn parse_bool(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>, String> {
    match env(key).as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
        Some(v) => Err(format!("Invalid value for {key} ({v:?}): expected true/false")),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merge environment variables (base) with optional YAML overrides.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml.unwrap_or_default();
    let server = yaml.server.unwrap_or_default();
    let tls_yaml = server.tls.unwrap_or_default();
    let webhook = yaml.webhook.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();
    let history = yaml.history.unwrap_or_default();

    let host = server
        .host
        .or_else(|| non_empty(env("HOST")))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match server.port {
        Some(port) => port,
        None => parse_env::<u16>(&env, "PORT")?.unwrap_or(DEFAULT_PORT),
    };

    let tls_enabled = match tls_yaml.enabled {
        Some(enabled) => enabled,
        None => parse_bool(&env, "TLS_ENABLED")?.unwrap_or(false),
    };
    let tls = if tls_enabled {
        let cert_path = tls_yaml.cert_path.or_else(|| non_empty(env("TLS_CERT_PATH")));
        let key_path = tls_yaml.key_path.or_else(|| non_empty(env("TLS_KEY_PATH")));
        match (cert_path, key_path) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            _ => {
                return Err(
                    "TLS is enabled but TLS_CERT_PATH and TLS_KEY_PATH are not both set".into(),
                );
            }
        }
    } else {
        None
    };

    let vapi_secret = non_empty(webhook.secret).or_else(|| non_empty(env("VAPI_SECRET")));
    let cors_allowed_origins = non_empty(security.cors_allowed_origins)
        .or_else(|| non_empty(env("CORS_ALLOWED_ORIGINS")));

    let defaults = HistoryLimits::default();
    let history = HistoryLimits {
        calls: match history.max_calls {
            Some(n) => n,
            None => parse_env(&env, "MAX_CALLS")?.unwrap_or(defaults.calls),
        },
        conversations: match history.max_conversations {
            Some(n) => n,
            None => parse_env(&env, "MAX_CONVERSATIONS")?.unwrap_or(defaults.conversations),
        },
        assistants: match history.max_assistants {
            Some(n) => n,
            None => parse_env(&env, "MAX_ASSISTANTS")?.unwrap_or(defaults.assistants),
        },
        log_sessions: match history.max_log_sessions {
            Some(n) => n,
            None => parse_env(&env, "MAX_LOG_SESSIONS")?.unwrap_or(defaults.log_sessions),
        },
    };

    Ok(ServerConfig {
        host,
        port,
        tls,
        vapi_secret,
        cors_allowed_origins,
        history,
    })
}
