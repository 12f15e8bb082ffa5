//! Client error types.

use thiserror::Error;

/// Errors raised while configuring a client or talking to a node.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable response body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-2xx status.
    #[error("node returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Node error code, if the body carried one.
        code: Option<i64>,
        /// Node error message or raw body.
        message: String,
    },

    /// The node address is not a valid base URL.
    #[error("invalid node URL: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration value or file.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClientError> for acryl::Error {
    fn from(err: ClientError) -> Self {
        Self::network(err)
    }
}

/// Result type for client construction and configuration.
pub type Result<T> = std::result::Result<T, ClientError>;
