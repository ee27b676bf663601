//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod server;

pub use handlers::{FAILED_BORDERS_HEADER, HELP_TEXT, PARTIAL_RESULT_HEADER};
pub use server::HttpServer;
