//! Error types for identity, signing and node operations.

use core::fmt;

/// Boxed transport error handed back by a node collaborator.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while deriving keys, signing or talking to a node.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed, wrongly sized or conflicting key inputs.
    InvalidKeyMaterial(String),
    /// Signing attempted on a watch-only identity.
    MissingPrivateKey,
    /// Non-positive transfer amount or fee.
    InvalidAmount {
        /// Which value was rejected (`amount` or `fee`).
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// Address string failed decoding, checksum or network checks.
    InvalidAddress(String),
    /// Alias name outside the allowed length or alphabet.
    InvalidAlias(String),
    /// Transfer attachment exceeds the protocol limit.
    InvalidAttachment {
        /// Attachment length in bytes.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Asset or mass transfer parameters outside protocol limits.
    InvalidTransaction(String),
    /// Input was not valid base58 or had the wrong length.
    InvalidEncoding(String),
    /// Invalid mnemonic phrase.
    Mnemonic(bip39::Error),
    /// Transport-level failure talking to the node; safe to retry.
    Network(TransportError),
    /// The node refused the transaction; retrying without changes will fail again.
    RejectedTransaction {
        /// HTTP status code returned by the node.
        status: u16,
        /// Node error code, when the body carried one.
        code: Option<i64>,
        /// Node error message or raw body.
        message: String,
    },
    /// JSON encoding or decoding failed.
    Serialization(serde_json::Error),
    /// Reading or writing a key file failed.
    Io(std::io::Error),
}

impl Error {
    /// Convenience constructor for [`Error::InvalidKeyMaterial`].
    pub fn key_material(msg: impl Into<String>) -> Self {
        Self::InvalidKeyMaterial(msg.into())
    }

    /// Wrap any transport error as [`Error::Network`].
    pub fn network<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network(Box::new(err))
    }

    /// Whether the caller may retry the same request unchanged.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyMaterial(msg) => write!(f, "invalid key material: {msg}"),
            Self::MissingPrivateKey => write!(f, "identity is watch-only: no private key"),
            Self::InvalidAmount { field, value } => {
                write!(f, "invalid {field} {value}, must be greater than zero")
            }
            Self::InvalidAddress(msg) => write!(f, "invalid address: {msg}"),
            Self::InvalidAlias(alias) => write!(
                f,
                "invalid alias \"{alias}\": expected 4 to 30 characters of -.0-9@_a-z"
            ),
            Self::InvalidAttachment { len, max } => {
                write!(f, "attachment is {len} bytes, maximum is {max}")
            }
            Self::InvalidTransaction(msg) => write!(f, "invalid transaction: {msg}"),
            Self::InvalidEncoding(msg) => write!(f, "invalid encoding: {msg}"),
            Self::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::RejectedTransaction {
                status,
                code,
                message,
            } => match code {
                Some(code) => write!(
                    f,
                    "node rejected transaction (HTTP {status}, code {code}): {message}"
                ),
                None => write!(f, "node rejected transaction (HTTP {status}): {message}"),
            },
            Self::Serialization(e) => write!(f, "serialization error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            Self::Network(e) => Some(e.as_ref()),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidKeyMaterial(_)
            | Self::MissingPrivateKey
            | Self::InvalidAmount { .. }
            | Self::InvalidAddress(_)
            | Self::InvalidAlias(_)
            | Self::InvalidAttachment { .. }
            | Self::InvalidTransaction(_)
            | Self::InvalidEncoding(_)
            | Self::RejectedTransaction { .. } => None,
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result type for Acryl operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_amount() {
        let err = Error::InvalidAmount {
            field: "amount",
            value: -5,
        };
        assert_eq!(err.to_string(), "invalid amount -5, must be greater than zero");
    }

    #[test]
    fn test_display_rejected_with_code() {
        let err = Error::RejectedTransaction {
            status: 400,
            code: Some(112),
            message: "negative balance".into(),
        };
        assert_eq!(
            err.to_string(),
            "node rejected transaction (HTTP 400, code 112): negative balance"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_network_is_retryable_and_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::network(io);
        assert!(err.is_retryable());
        assert!(std::error::Error::source(&err).is_some());
    }
}
