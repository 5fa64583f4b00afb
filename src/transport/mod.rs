//! Transport layer: the seam between the client and the wire.
//!
//! [`RestClient`](crate::RestClient) composes an [`OutboundRequest`] and hands
//! it to a [`Transport`]. The default implementation is [`HttpTransport`]
//! (reqwest, blocking); tests plug in recording doubles.

pub mod http;

pub use http::HttpTransport;

use crate::types::{HeaderSet, Method, RequestBody, TransportOptions};

/// Fully composed request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderSet,
    pub body: Option<RequestBody>,
    pub options: TransportOptions,
}

/// Response as received, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderSet,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderSet::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reads the whole response body.
///
/// Implementations must not retry; the client reports every failure as-is.
pub trait Transport: Send + Sync {
    fn send(&self, request: OutboundRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be assembled (bad header name or value, bad MIME type).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Status and headers arrived but the body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Transport error: {0}")]
    Other(String),
}
