//! Webhook processing core
//!
//! - `payload` - shape classification of inbound JSON
//! - `dispatcher` - applies classified payloads to the history store
//! - `functions` - function-call read queries
//! - `log_parser` - raw log text parsing

pub mod dispatcher;
pub mod functions;
pub mod log_parser;
pub mod payload;

pub use dispatcher::{DispatchOutcome, dispatch};
pub use functions::{CLINIC_INFO, FunctionCall};
pub use log_parser::parse_log_text;
pub use payload::{LogBody, LogSubmission, WebhookPayload, classify};
