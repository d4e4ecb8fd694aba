pub mod webhook_secret;

// Re-export middleware functions
pub use webhook_secret::webhook_secret_middleware;
