pub mod api;

pub use api::{WEBHOOK_PATH, create_app, create_webhook_router};
