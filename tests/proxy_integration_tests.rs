//! Integration tests for the proxy and the HTTP clients.
//!
//! A fake Gemini upstream runs on a loopback port; the real proxy router is
//! served in front of it and exercised over HTTP.

use std::net::SocketAddr;
use std::process::Command;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use legalassist::{
    build_prompt, build_router, ApiKey, ConversationController, GeminiClient, GeminiConfig,
    GenerativeClient, Message, ProxyClient, TRANSPORT_FAILURE_FALLBACK,
};

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    api_key: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

/// Fake upstream answering every POST with `status` and `reply`.
async fn spawn_upstream(status: StatusCode, reply: Value) -> (SocketAddr, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&log);

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, Json(body): Json<Value>| {
        let recorder = Arc::clone(&recorder);
        let reply = reply.clone();
        async move {
            recorder.lock().unwrap().push(Recorded {
                path: uri.path().to_string(),
                api_key: headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
                body,
            });
            (status, Json(reply))
        }
    });

    (spawn(app).await, log)
}

async fn spawn_proxy(upstream: SocketAddr) -> SocketAddr {
    let config = GeminiConfig::new(ApiKey::new("test-key")).with_base_url(format!("http://{upstream}"));
    let client: Arc<dyn GenerativeClient> = Arc::new(GeminiClient::new(config));
    spawn(build_router(client)).await
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 10}
    })
}

#[tokio::test]
async fn test_proxy_injects_key_and_relays_reply() {
    let (upstream, log) = spawn_upstream(StatusCode::OK, gemini_reply("Refer to *Section 138*.")).await;
    let proxy = spawn_proxy(upstream).await;

    let request = build_prompt(&[Message::assistant("Welcome"), Message::user("Cheque bounced")]);
    let response = ProxyClient::new(format!("http://{proxy}"), None)
        .generate(&request)
        .await
        .expect("proxy call");

    assert_eq!(response.reply_text(), Some("Refer to *Section 138*."));

    let recorded = log.lock().unwrap().clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].path,
        "/v1beta/models/gemini-2.5-flash:generateContent"
    );
    assert_eq!(recorded[0].api_key.as_deref(), Some("test-key"));
    assert_eq!(recorded[0].body, serde_json::to_value(&request).unwrap());
}

#[tokio::test]
async fn test_proxy_returns_upstream_body_verbatim() {
    let upstream_body = gemini_reply("verbatim");
    let (upstream, _log) = spawn_upstream(StatusCode::OK, upstream_body.clone()).await;
    let proxy = spawn_proxy(upstream).await;

    let response = reqwest::Client::new()
        .post(format!("http://{proxy}/api/chat"))
        .json(&json!({"contents": [], "anything": [1, 2, 3]}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn test_proxy_hides_upstream_error() {
    let (upstream, _log) = spawn_upstream(
        StatusCode::FORBIDDEN,
        json!({"error": {"code": 403, "message": "API key not valid"}}),
    )
    .await;
    let proxy = spawn_proxy(upstream).await;

    let response = reqwest::Client::new()
        .post(format!("http://{proxy}/api/chat"))
        .json(&json!({"contents": []}))
        .send()
        .await
        .expect("request");

    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({"error": "Failed to communicate with Gemini"}));
}

#[tokio::test]
async fn test_proxy_reports_unreachable_upstream_as_generic_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);
    let proxy = spawn_proxy(dead).await;

    let response = reqwest::Client::new()
        .post(format!("http://{proxy}/api/chat"))
        .json(&json!({"contents": []}))
        .send()
        .await
        .expect("request");

    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_conversation_through_proxy() {
    let (upstream, log) = spawn_upstream(StatusCode::OK, gemini_reply("You may file a complaint.")).await;
    let proxy = spawn_proxy(upstream).await;
    let client = ProxyClient::new(format!("http://{proxy}"), None);

    let mut conversation = ConversationController::new();
    assert!(conversation.send("My employer withheld wages", &client).await);
    assert!(conversation.send("What next?", &client).await);

    let messages = conversation.transcript().messages();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[4].content(), "You may file a complaint.");
    assert!(!conversation.is_pending());

    let recorded = log.lock().unwrap().clone();
    let contents = recorded[1].body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 4);
    assert_eq!(contents[1]["parts"][0]["text"], "My employer withheld wages");
}

#[tokio::test]
async fn test_conversation_falls_back_when_proxy_fails() {
    let (upstream, _log) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    let proxy = spawn_proxy(upstream).await;
    let client = ProxyClient::new(format!("http://{proxy}"), None);

    let mut conversation = ConversationController::new();
    conversation.send("Hello", &client).await;

    let messages = conversation.transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].content(), TRANSPORT_FAILURE_FALLBACK);
    assert!(!conversation.is_pending());
}

#[test]
fn test_serve_without_key_exits_before_binding() {
    let output = Command::new(env!("CARGO_BIN_EXE_legalassist"))
        .args(["serve", "--port", "0"])
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GEMINI_API_KEY is not defined"));
    assert!(!stderr.contains("listening"));
}
