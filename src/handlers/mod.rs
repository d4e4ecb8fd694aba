//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `webhook` - Webhook receiver and function-call query endpoint

pub mod api;
pub mod webhook;

pub use webhook::vapi_actions;
