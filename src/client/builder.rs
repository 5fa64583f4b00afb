use crate::client::core::RestClient;
use crate::config::{ClientConfig, LogConfig, TransportSettings};
use crate::transport::Transport;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct RestClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl RestClientBuilder {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Start from an existing configuration (e.g. loaded from YAML).
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Initial bearer credential.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Enable the DEBUG-level file sink at `path`.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.logging.file = Some(path.into());
        self
    }

    /// Console at INFO (default) or, when `false`, ERROR only.
    pub fn console_logging(mut self, enable: bool) -> Self {
        self.config.logging.console = enable;
        self
    }

    pub fn logging(mut self, logging: LogConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Client-wide request timeout. Per-call timeouts go through `RequestOptions::timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.transport.timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.transport.proxy = Some(proxy_url.into());
        self
    }

    pub fn transport_settings(mut self, settings: TransportSettings) -> Self {
        self.config.transport = settings;
        self
    }

    /// Replace the reqwest transport, primarily for tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RestClient> {
        match self.transport {
            Some(transport) => Ok(RestClient::with_transport(self.config, transport)),
            None => RestClient::new(self.config),
        }
    }
}
