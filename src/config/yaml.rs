use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3000
///   tls:
///     enabled: true
///     cert_path: "/etc/vapi-webhook/cert.pem"
///     key_path: "/etc/vapi-webhook/key.pem"
///
/// webhook:
///   secret: "shared-secret"
///
/// security:
///   cors_allowed_origins: "https://dashboard.example.com"
///
/// history:
///   max_calls: 100
///   max_conversations: 100
///   max_assistants: 100
///   max_log_sessions: 20
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub webhook: Option<WebhookYaml>,
    pub security: Option<SecurityYaml>,
    pub history: Option<HistoryYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Webhook settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebhookYaml {
    /// Shared secret expected in the `x-vapi-secret` header
    pub secret: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
}

/// History capacities from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HistoryYaml {
    pub max_calls: Option<usize>,
    pub max_conversations: Option<usize>,
    pub max_assistants: Option<usize>,
    pub max_log_sessions: Option<usize>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: YamlConfig = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
  tls:
    enabled: true
    cert_path: "/certs/cert.pem"
    key_path: "/certs/key.pem"

webhook:
  secret: "yaml-secret"

security:
  cors_allowed_origins: "*"

history:
  max_calls: 50
  max_log_sessions: 5
"#;
        let config = YamlConfig::from_yaml_str(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));
        let tls = server.tls.unwrap();
        assert_eq!(tls.enabled, Some(true));
        assert_eq!(tls.cert_path.as_deref(), Some("/certs/cert.pem"));

        assert_eq!(config.webhook.unwrap().secret.as_deref(), Some("yaml-secret"));
        assert_eq!(
            config.security.unwrap().cors_allowed_origins.as_deref(),
            Some("*")
        );

        let history = config.history.unwrap();
        assert_eq!(history.max_calls, Some(50));
        assert_eq!(history.max_conversations, None);
        assert_eq!(history.max_log_sessions, Some(5));
    }

    #[test]
    fn test_yaml_config_empty() {
        let config = YamlConfig::from_yaml_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.webhook.is_none());
        assert!(config.history.is_none());
    }

    #[test]
    fn test_yaml_config_invalid_type() {
        let result = YamlConfig::from_yaml_str("server:\n  port: \"not-a-port\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "webhook:\n  secret: \"from-file\"\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.webhook.unwrap().secret.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_yaml_from_missing_file() {
        let path = PathBuf::from("/nonexistent/vapi-webhook.yaml");
        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
