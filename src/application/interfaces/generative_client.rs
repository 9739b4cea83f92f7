use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, GenerateContentRequest, GenerateContentResponse};

/// A successful upstream response: its status and JSON body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// Anything that can carry a `generateContent` payload to the model.
///
/// Implementors only deal with transport: [`GenerativeClient::forward`]
/// posts a raw JSON body and returns the upstream reply, failing on
/// transport errors and non-success statuses. The proxy route uses it
/// directly; the chat client goes through the typed
/// [`GenerativeClient::generate`].
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply, DomainError>;

    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DomainError> {
        let payload = serde_json::to_value(request)
            .map_err(|e| DomainError::decode(format!("failed to encode request: {e}")))?;
        let reply = self.forward(&payload).await?;
        serde_json::from_value(reply.body)
            .map_err(|e| DomainError::decode(format!("failed to decode response: {e}")))
    }
}
