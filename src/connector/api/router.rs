use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::application::GenerativeClient;

use super::controller::chat_controller;

pub const CHAT_ROUTE: &str = "/api/chat";

/// The proxy's single route, with permissive CORS so browser front-ends on
/// other origins can call it.
pub fn build_router(upstream: Arc<dyn GenerativeClient>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(CHAT_ROUTE, post(chat_controller::chat))
        .layer(cors)
        .with_state(upstream)
}
