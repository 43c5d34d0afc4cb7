//! Error types for Grafana API operations.

use thiserror::Error;

/// Errors that can occur during Grafana API operations.
#[derive(Debug, Error)]
pub enum GrafanaError {
    /// Configuration is missing or incomplete.
    #[error("Grafana configuration required: {0}")]
    ConfigMissing(String),

    /// Caller input rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered a read with something other than 200 OK.
    ///
    /// `body` is the raw response text, untouched.
    #[error("HTTP error {status_code}: returns {body}")]
    Status { status_code: u16, body: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local I/O error (reading request bodies from disk or stdin).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrafanaError {
    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for Grafana operations.
pub type Result<T> = core::result::Result<T, GrafanaError>;
