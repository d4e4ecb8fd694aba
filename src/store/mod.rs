//! In-memory webhook history
//!
//! The [`WebhookStore`] owns the four bounded collections the dashboard reads:
//! calls, conversation events, assistants and log sessions. Each collection
//! sits behind its own lock so a single mutation (insert, upsert, append) is
//! atomic with respect to concurrent requests. Nothing here is persisted; the
//! store lives as long as the [`AppState`](crate::state::AppState) holding it.

pub mod history;
pub mod records;

pub use history::{BoundedHistory, Upsert};
pub use records::{
    ASSISTANT_RECORD_TYPE, AssistantRecord, CallKind, CallRecord, ConversationEvent,
    ConversationKind, LogEntry, LogLevel, LogSession,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_CALLS: usize = 100;
pub const DEFAULT_MAX_CONVERSATIONS: usize = 100;
pub const DEFAULT_MAX_ASSISTANTS: usize = 100;
pub const DEFAULT_MAX_LOG_SESSIONS: usize = 20;

/// Capacity of each history collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLimits {
    pub calls: usize,
    pub conversations: usize,
    pub assistants: usize,
    pub log_sessions: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            calls: DEFAULT_MAX_CALLS,
            conversations: DEFAULT_MAX_CONVERSATIONS,
            assistants: DEFAULT_MAX_ASSISTANTS,
            log_sessions: DEFAULT_MAX_LOG_SESSIONS,
        }
    }
}

/// Current length of each collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryCounts {
    pub calls: usize,
    pub conversations: usize,
    pub assistants: usize,
    pub log_sessions: usize,
}

/// What happened when log entries were merged into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogAppend {
    Created { entries: usize },
    Appended { added: usize, total: usize },
}

#[derive(Debug)]
pub struct WebhookStore {
    calls: RwLock<BoundedHistory<CallRecord>>,
    conversations: RwLock<BoundedHistory<ConversationEvent>>,
    assistants: RwLock<BoundedHistory<AssistantRecord>>,
    log_sessions: RwLock<BoundedHistory<LogSession>>,
}

impl Default for WebhookStore {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

impl WebhookStore {
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            calls: RwLock::new(BoundedHistory::new(limits.calls)),
            conversations: RwLock::new(BoundedHistory::new(limits.conversations)),
            assistants: RwLock::new(BoundedHistory::new(limits.assistants)),
            log_sessions: RwLock::new(BoundedHistory::new(limits.log_sessions)),
        }
    }

    pub fn limits(&self) -> HistoryLimits {
        HistoryLimits {
            calls: self.calls.read().capacity(),
            conversations: self.conversations.read().capacity(),
            assistants: self.assistants.read().capacity(),
            log_sessions: self.log_sessions.read().capacity(),
        }
    }

    pub fn counts(&self) -> HistoryCounts {
        HistoryCounts {
            calls: self.calls.read().len(),
            conversations: self.conversations.read().len(),
            assistants: self.assistants.read().len(),
            log_sessions: self.log_sessions.read().len(),
        }
    }

    /// Prepend a call record. Repeated ids are not merged.
    pub fn record_call(&self, record: CallRecord) -> Option<CallRecord> {
        let evicted = self.calls.write().push_front(record);
        if let Some(ref old) = evicted {
            tracing::debug!(call_id = %old.id, "Evicted oldest call record");
        }
        evicted
    }

    pub fn record_conversation(&self, event: ConversationEvent) -> Option<ConversationEvent> {
        let evicted = self.conversations.write().push_front(event);
        if let Some(ref old) = evicted {
            tracing::debug!(event_id = %old.id, "Evicted oldest conversation event");
        }
        evicted
    }

    /// Replace the assistant with the same id in place, or prepend it.
    pub fn upsert_assistant(&self, record: AssistantRecord) -> Upsert<AssistantRecord> {
        let id = record.id.clone();
        let outcome = self
            .assistants
            .write()
            .upsert_by(record, |existing| existing.id == id);
        if let Upsert::Inserted {
            evicted: Some(ref old),
        } = outcome
        {
            tracing::debug!(assistant_id = %old.id, "Evicted oldest assistant");
        }
        outcome
    }

    /// Append entries to an existing session, or create it at the front.
    ///
    /// An existing session keeps its position and original timestamp.
    pub fn append_log_entries(
        &self,
        session_id: &str,
        timestamp: &str,
        entries: Vec<LogEntry>,
    ) -> LogAppend {
        let mut sessions = self.log_sessions.write();

        if let Some(session) = sessions.find_mut(|s| s.id == session_id) {
            let added = entries.len();
            session.entries.extend(entries);
            return LogAppend::Appended {
                added,
                total: session.entries.len(),
            };
        }

        let count = entries.len();
        let evicted = sessions.push_front(LogSession {
            id: session_id.to_string(),
            timestamp: timestamp.to_string(),
            entries,
        });
        if let Some(old) = evicted {
            tracing::debug!(session_id = %old.id, "Evicted oldest log session");
        }
        LogAppend::Created { entries: count }
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.read().snapshot()
    }

    pub fn conversations(&self) -> Vec<ConversationEvent> {
        self.conversations.read().snapshot()
    }

    pub fn assistants(&self) -> Vec<AssistantRecord> {
        self.assistants.read().snapshot()
    }

    pub fn log_sessions(&self) -> Vec<LogSession> {
        self.log_sessions.read().snapshot()
    }

    pub fn log_session(&self, session_id: &str) -> Option<LogSession> {
        self.log_sessions
            .read()
            .find(|s| s.id == session_id)
            .cloned()
    }
}
