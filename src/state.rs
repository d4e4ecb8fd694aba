use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::WebhookStore;

/// Application state shared by all handlers
///
/// Holds the configuration and the in-memory webhook history. One instance
/// per process in production; tests build their own for isolation.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub store: WebhookStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let store = WebhookStore::new(config.history);

        tracing::info!(
            max_calls = config.history.calls,
            max_conversations = config.history.conversations,
            max_assistants = config.history.assistants,
            max_log_sessions = config.history.log_sessions,
            secret_check = config.has_webhook_secret(),
            "Initialized webhook history"
        );

        Arc::new(Self { config, store })
    }
}
