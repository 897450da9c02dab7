//! Statute API client error types.

/// Errors from statute retrieval.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error (connection, timeout, TLS).
    #[error("HTTP error calling {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("statute API {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    /// The body was not a statute document.
    #[error("malformed statute response from {url}: {source}")]
    Malformed {
        url: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl FetchError {
    /// Whether the failure came from the network or the service rather than
    /// from the response payload.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Status { .. })
    }

    /// HTTP status, when the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
