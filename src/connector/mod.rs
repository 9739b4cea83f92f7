//! # Connector Layer
//!
//! External integrations around the application layer:
//! - HTTP clients for the Gemini API and for the proxy
//! - The proxy's axum route
//! - The terminal chat front-end

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::{build_router, serve, ApiError, Container, ContainerConfig, CHAT_ROUTE};
