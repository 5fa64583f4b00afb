use crate::config::ClientConfig;
use crate::diagnostics::Diagnostics;
use crate::transport::{HttpTransport, Transport};
use crate::types::HeaderSet;
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Blocking REST client bound to one base address.
///
/// Every request goes through [`execute`](RestClient::execute) and
/// [`classify_response`](RestClient::classify_response); the verb-specific
/// methods only choose the verb and the body shape.
pub struct RestClient {
    pub(crate) config: ClientConfig,
    pub(crate) token: Option<String>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) diagnostics: Diagnostics,
}

impl RestClient {
    /// Create a client with the default reqwest transport.
    ///
    /// Fails only if the HTTP client cannot be built. A log file that cannot
    /// be opened is reported on the console and otherwise ignored.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let diagnostics = Diagnostics::new(&config.logging);
        let settings = config.transport.clone().with_env_overrides();
        let transport = diagnostics.in_scope(|| HttpTransport::new(&settings))?;
        Ok(Self::assemble(config, Arc::new(transport), diagnostics))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let diagnostics = Diagnostics::new(&config.logging);
        Self::assemble(config, transport, diagnostics)
    }

    pub fn builder(base_url: impl AsRef<str>) -> super::RestClientBuilder {
        super::RestClientBuilder::new(base_url)
    }

    fn assemble(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        diagnostics: Diagnostics,
    ) -> Self {
        let token = config.token.clone();
        Self {
            config,
            token,
            transport,
            diagnostics,
        }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    /// Replace the bearer credential used by subsequent calls.
    pub fn set_credential(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.diagnostics.in_scope(|| info!("Token set"));
    }

    pub fn clear_credential(&mut self) {
        self.token = None;
        self.diagnostics.in_scope(|| info!("Token cleared"));
    }

    /// Compose request headers.
    ///
    /// Starts from `Accept: application/json`, adds `Authorization: Bearer <token>`
    /// when a credential is set, then applies `overrides` (caller wins).
    pub fn build_headers(&self, overrides: Option<&HeaderSet>) -> HeaderSet {
        let mut headers = HeaderSet::new().with("Accept", "application/json");
        if let Some(token) = &self.token {
            headers.insert("Authorization", format!("Bearer {}", token));
        }
        if let Some(overrides) = overrides {
            headers.merge(overrides);
        }
        headers
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.config.base_url())
            .field("has_credential", &self.token.is_some())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use crate::transport::{OutboundRequest, RawResponse, TransportError};

    struct NullTransport;

    impl Transport for NullTransport {
        fn send(&self, _request: OutboundRequest) -> std::result::Result<RawResponse, TransportError> {
            Err(TransportError::Other("unused".into()))
        }
    }

    fn quiet_client(token: Option<&str>) -> RestClient {
        let mut config = ClientConfig::new("http://api.test/");
        config.token = token.map(str::to_string);
        config.logging = LogConfig {
            console: false,
            file: None,
        };
        RestClient::with_transport(config, Arc::new(NullTransport))
    }

    #[test]
    fn test_default_headers_without_credential() {
        let client = quiet_client(None);
        let headers = client.build_headers(None);
        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert!(!headers.contains("Authorization"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_headers_with_credential_and_overrides() {
        let client = quiet_client(Some("t0"));
        let overrides = HeaderSet::new()
            .with("accept", "text/csv")
            .with("X-Custom", "1");
        let headers = client.build_headers(Some(&overrides));
        assert_eq!(headers.get("Accept"), Some("text/csv"));
        assert_eq!(headers.get("Authorization"), Some("Bearer t0"));
        assert_eq!(headers.get("x-custom"), Some("1"));
    }

    #[test]
    fn test_override_can_replace_authorization() {
        let client = quiet_client(Some("t0"));
        let overrides = HeaderSet::new().with("Authorization", "Basic abc");
        let headers = client.build_headers(Some(&overrides));
        assert_eq!(headers.get("authorization"), Some("Basic abc"));
    }

    #[test]
    fn test_credential_rotation() {
        let mut client = quiet_client(None);
        assert!(!client.has_credential());
        client.set_credential("first");
        assert_eq!(client.build_headers(None).get("Authorization"), Some("Bearer first"));
        client.set_credential("second");
        assert_eq!(client.build_headers(None).get("Authorization"), Some("Bearer second"));
        client.clear_credential();
        assert!(!client.build_headers(None).contains("Authorization"));
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = quiet_client(None);
        assert_eq!(client.base_url(), "http://api.test");
    }
}
