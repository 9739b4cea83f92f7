use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing::debug;

use crate::application::GenerativeClient;
use crate::connector::adapter::{GeminiClient, GeminiConfig};

pub const DEFAULT_PORT: u16 = 3000;

pub struct ContainerConfig {
    pub port: u16,
    /// Bind to 0.0.0.0 instead of 127.0.0.1.
    pub public: bool,
    pub gemini: GeminiConfig,
}

impl ContainerConfig {
    pub fn new(gemini: GeminiConfig) -> Self {
        Self {
            port: DEFAULT_PORT,
            public: false,
            gemini,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.public {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };
        SocketAddr::from((ip, self.port))
    }
}

/// Wires the upstream client the proxy route forwards to.
pub struct Container {
    upstream: Arc<dyn GenerativeClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let client = GeminiClient::new(config.gemini.clone());
        debug!("Forwarding chat requests to {}", client.url());
        Self {
            upstream: Arc::new(client),
            config,
        }
    }

    pub fn with_upstream(config: ContainerConfig, upstream: Arc<dyn GenerativeClient>) -> Self {
        Self { upstream, config }
    }

    pub fn upstream(&self) -> Arc<dyn GenerativeClient> {
        Arc::clone(&self.upstream)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr()
    }
}
