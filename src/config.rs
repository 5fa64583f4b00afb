//! Client configuration.
//!
//! Everything here is plain data: it can be built in code, deserialized from
//! YAML, and adjusted through `REST_API_TOOL_*` environment variables before
//! the transport is created.

use crate::{ApiError, Result};
use serde::{Deserialize, Deserializer};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_TIMEOUT_SECS: &str = "REST_API_TOOL_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "REST_API_TOOL_CONNECT_TIMEOUT_SECS";
pub const ENV_POOL_MAX_IDLE_PER_HOST: &str = "REST_API_TOOL_POOL_MAX_IDLE_PER_HOST";
pub const ENV_POOL_IDLE_TIMEOUT_SECS: &str = "REST_API_TOOL_POOL_IDLE_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "REST_API_TOOL_PROXY_URL";

/// Immutable per-backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(deserialize_with = "deserialize_base_url")]
    base_url: String,
    /// Initial bearer credential; rotate later with `RestClient::set_credential`.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub logging: LogConfig,
    #[serde(default)]
    pub transport: TransportSettings,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            token: None,
            logging: LogConfig::default(),
            transport: TransportSettings::default(),
        }
    }

    /// Base address with trailing `/` removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) {
        self.base_url = normalize_base_url(base_url.as_ref());
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| config_error(format!("invalid client config: {}", e)))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }
}

// No client exists yet, so this goes to the caller's current subscriber.
fn config_error(message: String) -> ApiError {
    let err = ApiError::configuration(message);
    tracing::error!("{}", err);
    err
}

/// Join a base address and an endpoint with exactly one `/`.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn deserialize_base_url<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_base_url(&raw))
}

/// Diagnostic sink configuration.
///
/// The console sink logs at INFO; the optional file sink logs at DEBUG and
/// additionally captures headers and truncated bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// INFO on stderr when `true`; `false` keeps the console at ERROR only.
    #[serde(default = "default_true")]
    pub console: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Settings for the underlying HTTP client.
///
/// Timeouts are whole seconds in YAML (`timeout_secs`, `connect_timeout_secs`)
/// and in the environment; code can set any [`Duration`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Client-wide request timeout. `None` means no timeout.
    #[serde(rename = "timeout_secs", deserialize_with = "deserialize_secs")]
    pub timeout: Option<Duration>,
    #[serde(rename = "connect_timeout_secs", deserialize_with = "deserialize_secs")]
    pub connect_timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            proxy: None,
            user_agent: concat!("rest-api-tool/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportSettings {
    /// Overlay `REST_API_TOOL_*` environment variables. Unparsable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u64 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        if let Some(secs) = parse_u64(ENV_TIMEOUT_SECS) {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = parse_u64(ENV_CONNECT_TIMEOUT_SECS) {
            self.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(n) = lookup(ENV_POOL_MAX_IDLE_PER_HOST).and_then(|s| s.trim().parse::<usize>().ok()) {
            self.pool_max_idle_per_host = n;
        }
        if let Some(secs) = parse_u64(ENV_POOL_IDLE_TIMEOUT_SECS) {
            self.pool_idle_timeout_secs = secs;
        }
        if let Some(proxy) = lookup(ENV_PROXY_URL).filter(|s| !s.trim().is_empty()) {
            self.proxy = Some(proxy);
        }
        self
    }
}

fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CapturedLogs;
    use std::collections::HashMap;

    #[test]
    fn test_base_url_trimmed() {
        let config = ClientConfig::new("http://api.example.com///");
        assert_eq!(config.base_url(), "http://api.example.com");
    }

    #[test]
    fn test_join_url_single_separator() {
        for base in ["http://h/api", "http://h/api/", "http://h/api//"] {
            for endpoint in ["users", "/users", "//users"] {
                assert_eq!(join_url(base, endpoint), "http://h/api/users");
            }
        }
        assert_eq!(join_url("http://h", ""), "http://h/");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
base_url: "https://api.example.com/v1/"
token: abc
logging:
  file: logs/api.log
transport:
  timeout_secs: 15
  proxy: "http://proxy:3128"
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.base_url(), "https://api.example.com/v1");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert!(config.logging.console);
        assert_eq!(config.logging.file, Some(PathBuf::from("logs/api.log")));
        assert_eq!(config.transport.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.transport.connect_timeout, None);
        assert_eq!(config.transport.pool_max_idle_per_host, 32);
        assert_eq!(config.transport.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn test_yaml_config_missing_base_url() {
        let logs = CapturedLogs::default();
        let err = logs
            .capture(|| ClientConfig::from_yaml_str("token: abc"))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
        assert!(logs.contents().contains("Configuration error: invalid client config"));
    }

    #[test]
    fn test_yaml_file_missing_is_logged() {
        let logs = CapturedLogs::default();
        let err = logs
            .capture(|| ClientConfig::from_yaml_file("/definitely/not/here/client.yaml"))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
        let output = logs.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("cannot read /definitely/not/here/client.yaml"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_TIMEOUT_SECS, "7"),
            (ENV_POOL_MAX_IDLE_PER_HOST, "not-a-number"),
            (ENV_POOL_IDLE_TIMEOUT_SECS, "5"),
            (ENV_PROXY_URL, "  "),
        ]
        .into_iter()
        .collect();
        let settings = TransportSettings::default()
            .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.timeout, Some(Duration::from_secs(7)));
        assert_eq!(settings.pool_max_idle_per_host, 32);
        assert_eq!(settings.pool_idle_timeout_secs, 5);
        assert_eq!(settings.proxy, None);
        assert_eq!(settings.connect_timeout, None);
    }
}
