//! Record types kept in the webhook history
//!
//! These are the shapes returned to the dashboard by the function-call
//! queries, so their serialized field names are part of the wire contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Where a call record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallKind {
    /// Legacy `{callId, callData}` payload
    CallData,
    /// Full platform call object (inbound/outbound phone call)
    VapiCall,
}

/// A stored call. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: CallKind,
    pub data: Value,
}

/// The three typed conversation updates the platform sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationKind {
    SpeechUpdate,
    StatusUpdate,
    ConversationUpdate,
}

impl ConversationKind {
    pub const ALL: [ConversationKind; 3] = [
        ConversationKind::SpeechUpdate,
        ConversationKind::StatusUpdate,
        ConversationKind::ConversationUpdate,
    ];

    /// Wire value of the payload `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationKind::SpeechUpdate => "speech-update",
            ConversationKind::StatusUpdate => "status-update",
            ConversationKind::ConversationUpdate => "conversation-update",
        }
    }

    /// Payload field that carries the update body; also the id prefix.
    pub fn payload_field(&self) -> &'static str {
        match self {
            ConversationKind::SpeechUpdate => "speech",
            ConversationKind::StatusUpdate => "status",
            ConversationKind::ConversationUpdate => "conversation",
        }
    }

    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ConversationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored conversation update. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: ConversationKind,
    pub data: Value,
}

pub const ASSISTANT_RECORD_TYPE: &str = "assistant";

/// A stored assistant configuration, upserted by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRecord {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

/// Severity tag of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Log,
    Warn,
    Error,
    Checkpoint,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "LOG",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Checkpoint => "CHECKPOINT",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOG" => Ok(LogLevel::Log),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CHECKPOINT" => Ok(LogLevel::Checkpoint),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub level: LogLevel,
    pub message: String,
}

/// A named, growable sequence of log entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSession {
    pub id: String,
    pub timestamp: String,
    pub entries: Vec<LogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_record_wire_shape() {
        let record = CallRecord {
            id: "call-1".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
            kind: CallKind::VapiCall,
            data: json!({"status": "ended"}),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "call-1",
                "timestamp": "2025-01-01T00:00:00.000Z",
                "type": "vapi-call",
                "data": {"status": "ended"}
            })
        );
    }

    #[test]
    fn test_conversation_kind_lookup() {
        assert_eq!(
            ConversationKind::from_type("status-update"),
            Some(ConversationKind::StatusUpdate)
        );
        assert_eq!(ConversationKind::from_type("transcript"), None);
        assert_eq!(ConversationKind::SpeechUpdate.payload_field(), "speech");
    }

    #[test]
    fn test_log_level_round_trips_uppercase() {
        let entry = LogEntry {
            timestamp: "12:00:00:000".to_string(),
            level: LogLevel::Checkpoint,
            message: "ready".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "CHECKPOINT");
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("warn".parse::<LogLevel>().is_err());
    }
}
