use std::time::Duration;

use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::UpstreamReply;
use crate::domain::DomainError;

/// Build the outbound client. No timeout unless one is configured.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_default()
}

/// POST `payload` and return the JSON reply of a 2xx response.
///
/// Non-success statuses are logged with their body and reported as
/// [`DomainError::Upstream`]; the body never leaves this function.
pub(crate) async fn post_json(
    request: RequestBuilder,
    payload: &Value,
    source: &str,
) -> Result<UpstreamReply, DomainError> {
    let response = request
        .json(payload)
        .send()
        .await
        .map_err(|e| DomainError::transport(format!("{source}: request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("{source}: upstream returned {status}: {body}");
        return Err(DomainError::upstream(status.as_u16()));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| DomainError::decode(format!("{source}: failed to parse response: {e}")))?;

    debug!("{source}: upstream returned {status}");

    Ok(UpstreamReply {
        status: status.as_u16(),
        body,
    })
}
