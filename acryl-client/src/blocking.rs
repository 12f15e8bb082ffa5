//! Blocking node client.

use acryl::node::AliasTarget;
use acryl::{Address, Balance, BroadcastResult, NodeClient, SignedTransaction, VersionInfo};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{self, VERSION_PATH};

/// Blocking HTTP client for an Acryl node.
///
/// Without a session every call builds its own HTTP client; between
/// [`BlockingClient::start_session`] and [`BlockingClient::close_session`]
/// one pooled client is reused.
///
/// Must not be used from inside an async runtime; use
/// [`Client`](crate::Client) there.
#[derive(Debug)]
pub struct BlockingClient {
    config: ClientConfig,
    base_url: Url,
    session: Option<HttpClient>,
}

impl BlockingClient {
    /// Create a client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;
        Ok(Self {
            config,
            base_url,
            session: None,
        })
    }

    /// Client for the default public node.
    pub fn mainnet() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Active configuration.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_http(&self) -> Result<HttpClient> {
        Ok(HttpClient::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent.as_str())
            .default_headers(request::default_headers(&self.config)?)
            .build()?)
    }

    /// Open a pooled session. Idempotent.
    pub fn start_session(&mut self) -> Result<()> {
        if self.session.is_none() {
            self.session = Some(self.build_http()?);
            debug!(node = %self.base_url, "session started");
        }
        Ok(())
    }

    /// Drop the pooled session, if any.
    pub fn close_session(&mut self) {
        if self.session.take().is_some() {
            debug!(node = %self.base_url, "session closed");
        }
    }

    /// Whether a session is open.
    pub const fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn http(&self) -> Result<HttpClient> {
        match &self.session {
            Some(client) => Ok(client.clone()),
            None => self.build_http(),
        }
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            return Err(request::status_error(status.as_u16(), &body));
        }
        Ok(response.json()?)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = request::endpoint(&self.base_url, path)?;
        debug!(%url, "GET");
        self.send(self.http()?.get(url))
    }

    fn post_transaction(&self, transaction: &SignedTransaction) -> Result<BroadcastResult> {
        let url = request::endpoint(&self.base_url, transaction.broadcast_path())?;
        debug!(%url, id = %transaction.id(), "POST");
        self.send(self.http()?.post(url).json(transaction))
    }
}

impl NodeClient for BlockingClient {
    fn node_version(&self) -> acryl::Result<VersionInfo> {
        Ok(self.get(VERSION_PATH)?)
    }

    fn balance(&self, address: &Address) -> acryl::Result<Balance> {
        Ok(self.get(&request::balance_path(address))?)
    }

    fn effective_balance(&self, address: &Address) -> acryl::Result<Balance> {
        Ok(self.get(&request::effective_balance_path(address))?)
    }

    fn address_by_alias(&self, alias: &str) -> acryl::Result<Address> {
        let alias = acryl::Alias::new(alias)?;
        let target: AliasTarget = self.get(&request::alias_path(alias.name()))?;
        Ok(target.address)
    }

    fn broadcast(&self, transaction: &SignedTransaction) -> acryl::Result<BroadcastResult> {
        self.post_transaction(transaction)
            .map_err(|e| request::broadcast_error(transaction.broadcast_path(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_session_lifecycle() {
        let mut client = BlockingClient::mainnet().unwrap();
        assert!(!client.has_session());
        client.start_session().unwrap();
        client.start_session().unwrap();
        assert!(client.has_session());
        client.close_session();
        assert!(!client.has_session());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = BlockingClient::new(ClientConfig::new("nodes.acrylplatform.com")).unwrap_err();
        assert!(matches!(err, ClientError::Url(_)));
    }
}
