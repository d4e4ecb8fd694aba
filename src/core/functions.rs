//! Function-call queries
//!
//! The platform (and the dashboard) send `{message: {type: "function-call",
//! functionCall: {name, ...}}}` to run a named read against the history.
//! Queries never mutate the store.

use serde_json::{Map, Value};

use crate::errors::app_error::{AppError, AppResult};
use crate::store::WebhookStore;

pub const FUNCTION_CALL_TYPE: &str = "function-call";

/// Fixed answer for `getClinicInfo`
pub const CLINIC_INFO: &str = "Clinic: NUSCH, Bratislava";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCall {
    ClinicInfo,
    CallsData,
    ConversationsData,
    AssistantsData,
    LogSessions,
    LogSession { session_id: Option<String> },
    /// Unknown name, or no usable `functionCall` object
    Unknown { name: Option<String> },
}

impl FunctionCall {
    /// Parse the `functionCall` object of a function-call message.
    pub fn from_message(message: &Map<String, Value>) -> Self {
        let Some(call) = message.get("functionCall").and_then(Value::as_object) else {
            return FunctionCall::Unknown { name: None };
        };
        let name = call.get("name").and_then(Value::as_str);

        match name {
            Some("getClinicInfo") => FunctionCall::ClinicInfo,
            Some("getCallsData") => FunctionCall::CallsData,
            Some("getConversationsData") => FunctionCall::ConversationsData,
            Some("getAssistantsData") => FunctionCall::AssistantsData,
            Some("getLogSessions") => FunctionCall::LogSessions,
            Some("getLogSession") => FunctionCall::LogSession {
                session_id: session_id_argument(call),
            },
            other => FunctionCall::Unknown {
                name: other.map(str::to_string),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionCall::ClinicInfo => "getClinicInfo",
            FunctionCall::CallsData => "getCallsData",
            FunctionCall::ConversationsData => "getConversationsData",
            FunctionCall::AssistantsData => "getAssistantsData",
            FunctionCall::LogSessions => "getLogSessions",
            FunctionCall::LogSession { .. } => "getLogSession",
            FunctionCall::Unknown { name } => name.as_deref().unwrap_or("<none>"),
        }
    }

    /// Run the query against the store. The returned value goes under `result`.
    pub fn resolve(&self, store: &WebhookStore) -> AppResult<Value> {
        let result = match self {
            FunctionCall::ClinicInfo => Value::String(CLINIC_INFO.to_string()),
            FunctionCall::CallsData => to_value(store.calls())?,
            FunctionCall::ConversationsData => to_value(store.conversations())?,
            FunctionCall::AssistantsData => to_value(store.assistants())?,
            FunctionCall::LogSessions => to_value(store.log_sessions())?,
            FunctionCall::LogSession { session_id } => {
                let session_id = session_id.as_deref().ok_or(AppError::MissingSessionId)?;
                match store.log_session(session_id) {
                    Some(session) => to_value(session)?,
                    None => Value::Null,
                }
            }
            FunctionCall::Unknown { .. } => return Err(AppError::UnknownFunction),
        };

        Ok(result)
    }
}

/// `sessionId` sits directly on the function call (dashboard) or under
/// `parameters` (platform tool calls).
fn session_id_argument(call: &Map<String, Value>) -> Option<String> {
    call.get("sessionId")
        .or_else(|| call.get("parameters").and_then(|p| p.get("sessionId")))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn to_value<T: serde::Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Failed to serialize query result");
        AppError::Serialization(e.to_string())
    })
}
