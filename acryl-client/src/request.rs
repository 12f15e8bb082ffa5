//! Request plumbing shared by the blocking and async clients.

use acryl::Address;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

pub(crate) const VERSION_PATH: &str = "/node/version";

/// `X-API-KEY`, lowercase as header names are stored.
const API_KEY_HEADER: &str = "x-api-key";

pub(crate) fn balance_path(address: &Address) -> String {
    format!("/addresses/balance/{address}")
}

pub(crate) fn effective_balance_path(address: &Address) -> String {
    format!("/addresses/effectiveBalance/{address}")
}

pub(crate) fn alias_path(alias: &str) -> String {
    format!("/alias/by-alias/{alias}")
}

/// Join an absolute API path onto the node base URL, keeping any base path.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Ok(Url::parse(&joined)?)
}

/// Headers sent with every request.
pub(crate) fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &config.api_key {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|_| ClientError::Config("api key is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }
    Ok(headers)
}

/// Error body returned by the node: `{"error": 112, "message": "..."}`,
/// sometimes with `code` instead of `error`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<i64>,
    code: Option<i64>,
    message: Option<String>,
}

/// Build a [`ClientError::Status`] from a non-2xx response body.
pub(crate) fn status_error(status: u16, body: &str) -> ClientError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| body.chars().take(200).collect());
    ClientError::Status {
        status,
        code: parsed.error.or(parsed.code),
        message,
    }
}

/// Map a failed broadcast onto the core error.
///
/// A 4xx answer, or any answer carrying a node error code, is a
/// [`acryl::Error::RejectedTransaction`]. Server errors without a node error
/// body and transport failures stay retryable network errors.
pub(crate) fn broadcast_error(path: &str, err: ClientError) -> acryl::Error {
    match err {
        ClientError::Status {
            status,
            code,
            message,
        } if (400..500).contains(&status) || code.is_some() => {
            warn!(path, status, ?code, %message, "node rejected transaction");
            acryl::Error::RejectedTransaction {
                status,
                code,
                message,
            }
        }
        other => {
            warn!(path, error = %other, "broadcast failed");
            other.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://127.0.0.1:6869/api/").unwrap();
        assert_eq!(
            endpoint(&base, VERSION_PATH).unwrap().as_str(),
            "http://127.0.0.1:6869/api/node/version"
        );

        let base = Url::parse("https://nodes.acrylplatform.com").unwrap();
        assert_eq!(
            endpoint(&base, "/alias/by-alias/alice").unwrap().as_str(),
            "https://nodes.acrylplatform.com/alias/by-alias/alice"
        );
    }

    #[test]
    fn test_status_error_parses_node_body() {
        let err = status_error(400, r#"{"error":112,"message":"negative balance"}"#);
        assert!(matches!(
            err,
            ClientError::Status { status: 400, code: Some(112), ref message } if message == "negative balance"
        ));

        let err = status_error(400, r#"{"code":199,"message":"script error"}"#);
        assert!(matches!(err, ClientError::Status { code: Some(199), .. }));
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(502, "Bad Gateway");
        assert!(matches!(
            err,
            ClientError::Status { status: 502, code: None, ref message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn test_broadcast_error_mapping() {
        let rejected = broadcast_error(
            "/assets/broadcast/transfer",
            status_error(400, r#"{"error":112,"message":"negative balance"}"#),
        );
        assert!(matches!(
            rejected,
            acryl::Error::RejectedTransaction { status: 400, code: Some(112), .. }
        ));

        let network = broadcast_error("/x", ClientError::Config("x".into()));
        assert!(network.is_retryable());
    }

    #[test]
    fn test_broadcast_server_error_is_retryable() {
        let unavailable = broadcast_error("/x", status_error(503, "Service Unavailable"));
        assert!(matches!(unavailable, acryl::Error::Network(_)));
        assert!(unavailable.is_retryable());

        let coded = broadcast_error(
            "/x",
            status_error(500, r#"{"error":199,"message":"script error"}"#),
        );
        assert!(matches!(
            coded,
            acryl::Error::RejectedTransaction { status: 500, code: Some(199), .. }
        ));
    }

    #[test]
    fn test_api_key_header() {
        let config = ClientConfig::default().with_api_key("secret");
        let headers = default_headers(&config).unwrap();
        assert_eq!(headers["x-api-key"], "secret");
        assert!(default_headers(&ClientConfig::default()).unwrap().is_empty());
    }
}
