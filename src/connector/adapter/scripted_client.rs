use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::application::{GenerativeClient, UpstreamReply};
use crate::domain::DomainError;

enum Scripted {
    Reply(Value),
    TransportFailure(String),
    UpstreamStatus(u16),
}

/// In-memory [`GenerativeClient`] that plays back queued outcomes in order
/// and records every payload it was given.
///
/// Once the script runs out, further calls fail with a transport error.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a well-formed `generateContent` response carrying `text`.
    pub fn with_reply(self, text: &str) -> Self {
        self.with_raw(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    /// Queue an arbitrary 200 response body.
    pub fn with_raw(self, body: Value) -> Self {
        self.push(Scripted::Reply(body))
    }

    pub fn with_transport_failure(self, message: &str) -> Self {
        self.push(Scripted::TransportFailure(message.to_string()))
    }

    pub fn with_upstream_status(self, status: u16) -> Self {
        self.push(Scripted::UpstreamStatus(status))
    }

    /// Payloads received so far, oldest first.
    pub fn requests(&self) -> Vec<Value> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(self, entry: Scripted) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
        self
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply, DomainError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(payload.clone());
        }

        let next = self
            .script
            .lock()
            .map_err(|_| DomainError::internal("ScriptedClient: script lock poisoned"))?
            .pop_front();

        debug!("ScriptedClient: playing back next scripted outcome");

        match next {
            Some(Scripted::Reply(body)) => Ok(UpstreamReply { status: 200, body }),
            Some(Scripted::TransportFailure(message)) => Err(DomainError::transport(message)),
            Some(Scripted::UpstreamStatus(status)) => Err(DomainError::upstream(status)),
            None => Err(DomainError::transport("ScriptedClient: script exhausted")),
        }
    }
}
