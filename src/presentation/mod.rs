// Presentation layer - HTTP handlers and routing
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;
