use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::application::GenerativeClient;

use super::super::ApiError;

/// `POST /api/chat`: forward the body unchanged and relay the reply.
pub async fn chat(
    State(upstream): State<Arc<dyn GenerativeClient>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let reply = upstream.forward(&payload).await?;

    let status = StatusCode::from_u16(reply.status)
        .map_err(|e| ApiError::Upstream(format!("invalid upstream status {}: {e}", reply.status)))?;

    debug!("Relaying upstream reply with status {}", status);

    Ok((status, Json(reply.body)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::connector::api::build_router;
    use crate::connector::api::error::UPSTREAM_FAILURE_MESSAGE;
    use crate::connector::ScriptedClient;

    use super::*;

    fn post_chat(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_body_and_relays_reply_verbatim() {
        let upstream_body = json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "See *IPC Section 420*."}]}}],
            "modelVersion": "gemini-2.5-flash"
        });
        let scripted = Arc::new(ScriptedClient::new().with_raw(upstream_body.clone()));
        let app = build_router(scripted.clone());

        let payload = json!({
            "contents": [{"role": "user", "parts": [{"text": "Is cheating a crime?"}]}],
            "extra": {"left": "alone"}
        });
        let response = app.oneshot(post_chat(payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, upstream_body);
        assert_eq!(scripted.requests(), vec![payload]);
    }

    #[tokio::test]
    async fn test_upstream_failure_collapses_to_generic_error() {
        let scripted = Arc::new(ScriptedClient::new().with_upstream_status(403));
        let app = build_router(scripted);

        let response = app
            .oneshot(post_chat(json!({"contents": []}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": UPSTREAM_FAILURE_MESSAGE})
        );
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_leak_detail() {
        let scripted = Arc::new(
            ScriptedClient::new().with_transport_failure("dns error: generativelanguage"),
        );
        let app = build_router(scripted);

        let response = app.oneshot(post_chat("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({"error": "Failed to communicate with Gemini"}));
    }

    #[tokio::test]
    async fn test_rejects_non_json_body_without_calling_upstream() {
        let scripted = Arc::new(ScriptedClient::new().with_reply("unused"));
        let app = build_router(scripted.clone());

        let response = app.oneshot(post_chat("not json")).await.unwrap();

        assert!(response.status().is_client_error());
        assert!(scripted.requests().is_empty());
    }

    #[tokio::test]
    async fn test_only_post_is_routed() {
        let app = build_router(Arc::new(ScriptedClient::new()));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/chat")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
