//! Applies classified webhook payloads to the store
//!
//! [`dispatch`] is the effect half of the webhook pipeline: it takes a
//! [`WebhookPayload`] produced by [`classify`](super::payload::classify),
//! mutates the matching history collection (or runs a read query) and
//! returns a [`DispatchOutcome`] that renders to the JSON response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::log_parser::parse_log_text;
use super::payload::{LogBody, LogSubmission, WebhookPayload};
use crate::errors::app_error::AppResult;
use crate::store::{
    ASSISTANT_RECORD_TYPE, AssistantRecord, CallKind, CallRecord, ConversationEvent, LogAppend,
    LogEntry, LogLevel, Upsert, WebhookStore,
};
use crate::utils::ReceiptTime;

pub const UNRECOGNIZED_MESSAGE: &str = "Webhook received but not processed specifically";

/// Successful result of handling one webhook
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Function-call query answer, rendered as `{result}`
    Query(Value),
    /// A record was stored, rendered as `{success, message}`
    Ingested(String),
    /// Nothing matched; payload echoed back under `receivedData`
    Unrecognized(Value),
}

impl IntoResponse for DispatchOutcome {
    fn into_response(self) -> Response {
        let body = match self {
            DispatchOutcome::Query(result) => json!({ "result": result }),
            DispatchOutcome::Ingested(message) => json!({ "success": true, "message": message }),
            DispatchOutcome::Unrecognized(received) => json!({
                "success": true,
                "message": UNRECOGNIZED_MESSAGE,
                "receivedData": received,
            }),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Apply a classified payload. Only function-call queries can fail.
pub fn dispatch(
    store: &WebhookStore,
    payload: WebhookPayload,
    received: &ReceiptTime,
) -> AppResult<DispatchOutcome> {
    let timestamp = received.iso();

    let outcome = match payload {
        WebhookPayload::LogSubmission(submission) => {
            ingest_logs(store, submission, received, &timestamp)
        }

        WebhookPayload::AssistantConfig { id, data } => {
            let outcome = store.upsert_assistant(AssistantRecord {
                id: id.clone(),
                timestamp,
                kind: ASSISTANT_RECORD_TYPE.to_string(),
                data,
            });
            let replaced = matches!(outcome, Upsert::Replaced);
            info!(assistant_id = %id, replaced, "Stored assistant configuration");
            DispatchOutcome::Ingested("Assistant data received successfully".to_string())
        }

        WebhookPayload::PhoneCall { id, data } => {
            info!(call_id = %id, "Stored platform call record");
            store.record_call(CallRecord {
                id,
                timestamp,
                kind: CallKind::VapiCall,
                data,
            });
            DispatchOutcome::Ingested("Call data received successfully".to_string())
        }

        WebhookPayload::Update { kind, data } => {
            let id = format!("{}-{}", kind.payload_field(), received.unix_millis());
            info!(event_id = %id, kind = %kind, "Stored conversation event");
            store.record_conversation(ConversationEvent {
                id,
                timestamp,
                kind,
                data,
            });
            DispatchOutcome::Ingested(format!("{kind} received successfully"))
        }

        WebhookPayload::LegacyCall { call_id, data } => {
            info!(call_id = %call_id, "Stored legacy call data");
            store.record_call(CallRecord {
                id: call_id,
                timestamp,
                kind: CallKind::CallData,
                data,
            });
            DispatchOutcome::Ingested("Call data received successfully".to_string())
        }

        WebhookPayload::FunctionCall(call) => {
            debug!(function = %call.name(), "Resolving function call");
            let result = call.resolve(store).inspect_err(|e| {
                warn!(function = %call.name(), error = %e, "Rejected function call");
            })?;
            DispatchOutcome::Query(result)
        }

        WebhookPayload::Unrecognized(received_data) => {
            debug!("Webhook payload did not match any known shape");
            DispatchOutcome::Unrecognized(received_data)
        }
    };

    Ok(outcome)
}

fn ingest_logs(
    store: &WebhookStore,
    submission: LogSubmission,
    received: &ReceiptTime,
    timestamp: &str,
) -> DispatchOutcome {
    let session_id = submission
        .session_id
        .unwrap_or_else(|| format!("session-{}", received.unix_millis()));

    let entries = match submission.body {
        LogBody::Raw(text) => parse_log_text(&text, timestamp),
        LogBody::Entries(items) => items
            .into_iter()
            .filter_map(|item| structured_entry(item, timestamp))
            .collect(),
    };

    match store.append_log_entries(&session_id, timestamp, entries) {
        LogAppend::Created { entries } => {
            info!(session_id = %session_id, entries, "Created log session");
        }
        LogAppend::Appended { added, total } => {
            info!(session_id = %session_id, added, total, "Appended to log session");
        }
    }

    DispatchOutcome::Ingested(format!("Logs added to session {session_id}"))
}

/// Convert one submitted entry, defaulting a missing timestamp to receipt time
/// and a missing or unknown type to `LOG`. Non-object items are skipped.
fn structured_entry(item: Value, timestamp: &str) -> Option<LogEntry> {
    let Value::Object(map) = item else {
        debug!("Skipping non-object log entry");
        return None;
    };

    let level = map
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<LogLevel>().ok())
        .unwrap_or_default();
    let entry_timestamp = map
        .get("timestamp")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| timestamp.to_string());
    let message = match map.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Some(LogEntry {
        timestamp: entry_timestamp,
        level,
        message,
    })
}
