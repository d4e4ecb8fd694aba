//! Shape classification of inbound webhook payloads
//!
//! The platform sends untyped JSON. [`classify`] turns it into a
//! [`WebhookPayload`] by checking shapes in a fixed priority order; the first
//! rule that matches wins. Classification never touches the store, which
//! keeps precedence testable on its own.
//!
//! Order:
//! 1. log submission (`entries` array, or `sessionId` + string `message`)
//! 2. assistant configuration (`id` + `transcriber` + `model` + `voice`)
//! 3. full phone call (`id` + `type` of inbound/outbound phone call)
//! 4. typed update (`type` + the matching `speech`/`status`/`conversation`)
//! 5. legacy call data (`callId` + `callData` object, no `type`)
//! 6. function-call query (`message.type == "function-call"`)
//! 7. anything else is unrecognized

use serde_json::{Map, Value};

use super::functions::{FUNCTION_CALL_TYPE, FunctionCall};
use crate::store::ConversationKind;

pub const INBOUND_PHONE_CALL: &str = "inboundPhoneCall";
pub const OUTBOUND_PHONE_CALL: &str = "outboundPhoneCall";

/// Body of a log submission
#[derive(Debug, Clone, PartialEq)]
pub enum LogBody {
    /// Pre-structured entries; items are validated when applied
    Entries(Vec<Value>),
    /// Raw text to be line-split and parsed
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSubmission {
    pub session_id: Option<String>,
    pub body: LogBody,
}

/// A classified webhook payload
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    LogSubmission(LogSubmission),
    AssistantConfig { id: String, data: Value },
    PhoneCall { id: String, data: Value },
    Update { kind: ConversationKind, data: Value },
    LegacyCall { call_id: String, data: Value },
    FunctionCall(FunctionCall),
    Unrecognized(Value),
}

impl WebhookPayload {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            WebhookPayload::LogSubmission(_) => "log-submission",
            WebhookPayload::AssistantConfig { .. } => "assistant",
            WebhookPayload::PhoneCall { .. } => "vapi-call",
            WebhookPayload::Update { kind, .. } => kind.as_str(),
            WebhookPayload::LegacyCall { .. } => "call-data",
            WebhookPayload::FunctionCall(_) => "function-call",
            WebhookPayload::Unrecognized(_) => "unrecognized",
        }
    }

    /// Read-only queries are the only payloads exempt from the shared-secret
    /// check. A body carrying a function-call `message` next to a record shape
    /// classifies as the record, so it is not a query.
    pub fn is_query(&self) -> bool {
        matches!(self, WebhookPayload::FunctionCall(_))
    }
}

fn function_call_message(payload: &Value) -> Option<&Map<String, Value>> {
    payload
        .get("message")
        .and_then(Value::as_object)
        .filter(|message| message.get("type").and_then(Value::as_str) == Some(FUNCTION_CALL_TYPE))
}

/// Classify a payload by shape. See the module docs for the rule order.
pub fn classify(payload: Value) -> WebhookPayload {
    let mut map = match payload {
        Value::Object(map) => map,
        other => return WebhookPayload::Unrecognized(other),
    };

    if let Some(submission) = take_log_submission(&mut map) {
        return WebhookPayload::LogSubmission(submission);
    }

    if let Some(id) = identifier(&map, "id") {
        if ["transcriber", "model", "voice"]
            .iter()
            .all(|field| map.contains_key(*field))
        {
            return WebhookPayload::AssistantConfig {
                id,
                data: Value::Object(map),
            };
        }

        if matches!(
            map.get("type").and_then(Value::as_str),
            Some(INBOUND_PHONE_CALL | OUTBOUND_PHONE_CALL)
        ) {
            return WebhookPayload::PhoneCall {
                id,
                data: Value::Object(map),
            };
        }
    }

    if let Some(kind) = map
        .get("type")
        .and_then(Value::as_str)
        .and_then(ConversationKind::from_type)
    {
        if let Some(data) = map.remove(kind.payload_field()) {
            return WebhookPayload::Update { kind, data };
        }
    }

    if let Some(call_id) = identifier(&map, "callId") {
        if !map.contains_key("type") && map.get("callData").is_some_and(Value::is_object) {
            let data = map.remove("callData").unwrap_or(Value::Null);
            return WebhookPayload::LegacyCall { call_id, data };
        }
    }

    let payload = Value::Object(map);
    if let Some(message) = function_call_message(&payload) {
        return WebhookPayload::FunctionCall(FunctionCall::from_message(message));
    }

    WebhookPayload::Unrecognized(payload)
}

fn take_log_submission(map: &mut Map<String, Value>) -> Option<LogSubmission> {
    let session_id = map
        .get("sessionId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    if map.get("entries").is_some_and(Value::is_array) {
        let Some(Value::Array(entries)) = map.remove("entries") else {
            return None;
        };
        return Some(LogSubmission {
            session_id,
            body: LogBody::Entries(entries),
        });
    }

    if session_id.is_some() && map.get("message").is_some_and(Value::is_string) {
        let Some(Value::String(text)) = map.remove("message") else {
            return None;
        };
        return Some(LogSubmission {
            session_id,
            body: LogBody::Raw(text),
        });
    }

    None
}

/// Identifiers are normally strings; numeric ids are accepted and stringified.
fn identifier(map: &Map<String, Value>, field: &str) -> Option<String> {
    match map.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
