use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::{GenerativeClient, UpstreamReply};
use crate::connector::api::CHAT_ROUTE;
use crate::domain::DomainError;

use super::http::{build_http_client, post_json};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// Sends prompt envelopes to a LegalAssist proxy, which holds the key.
pub struct ProxyClient {
    client: reqwest::Client,
    url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Self {
        let url = format!("{}{}", base_url.as_ref().trim_end_matches('/'), CHAT_ROUTE);
        Self {
            client: build_http_client(timeout),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerativeClient for ProxyClient {
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply, DomainError> {
        post_json(self.client.post(&self.url), payload, "ProxyClient").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_chat_route() {
        assert_eq!(
            ProxyClient::new("http://localhost:3000/", None).url(),
            "http://localhost:3000/api/chat"
        );
        assert_eq!(
            ProxyClient::new(DEFAULT_PROXY_URL, None).url(),
            "http://localhost:3000/api/chat"
        );
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ProxyClient::new(format!("http://{addr}"), Some(Duration::from_secs(2)));
        let err = client.forward(&serde_json::json!({})).await.unwrap_err();
        assert!(err.is_transport());
    }
}
