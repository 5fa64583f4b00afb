use std::path::{Path, PathBuf};
use thiserror::Error;

/// Discriminant for [`ApiError`].
///
/// Every failure surfaced by the client falls into exactly one of these
/// categories. Callers that only want to present the error can use its
/// `Display` output; callers that want to branch can match on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a response (DNS, connect, TLS, timeout, invalid request).
    Transport,
    /// A response was received with a status outside `[200, 300)`.
    Status,
    /// A response was received but could not be inspected (e.g. body read failure).
    Classification,
    /// A local file could not be opened or read; nothing was sent.
    Io,
    /// The client or its configuration could not be built.
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Status => "status",
            ErrorKind::Classification => "classification",
            ErrorKind::Io => "io",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified error returned by every client operation.
///
/// Low-level causes (reqwest, std::io, serde) are flattened into a message at
/// the point of detection; only the message and the classification travel
/// to the caller.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to process response: {message}")]
    Classification { message: String },

    #[error("Failed to read file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            body: body.into(),
        }
    }

    pub fn classification(message: impl Into<String>) -> Self {
        ApiError::Classification {
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: &std::io::Error) -> Self {
        ApiError::Io {
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Classification { .. } => ErrorKind::Classification,
            ApiError::Io { .. } => ErrorKind::Io,
            ApiError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// HTTP status for [`ErrorKind::Status`] errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Render an error together with its `source()` chain, outermost first.
///
/// reqwest's `Display` stops at "error sending request"; the interesting part
/// (connection refused, dns failure) lives further down the chain.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        current = cause.source();
    }
    parts.join(": ")
}
