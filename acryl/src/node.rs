//! Contract between an identity and the node it talks to.
//!
//! [`NodeClient`] and [`AsyncNodeClient`] have the same operations and differ
//! only in scheduling. Implementations report transport failures as
//! [`Error::Network`](crate::Error::Network) and non-2xx answers to a
//! broadcast as [`Error::RejectedTransaction`](crate::Error::RejectedTransaction).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::address::Address;
use crate::error::Result;
use crate::transaction::SignedTransaction;

/// `GET /node/version` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Node version string, e.g. `Acryl v1.0.0`.
    pub version: String,
}

/// Balance response for regular and effective balance lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Queried address.
    pub address: Address,
    /// Confirmations the balance was computed with.
    #[serde(default)]
    pub confirmations: u32,
    /// Balance in base units.
    pub balance: u64,
}

/// `GET /alias/by-alias/{alias}` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// Address the alias points to.
    pub address: Address,
}

/// Node answer to an accepted broadcast: the transaction as the node sees it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    /// Transaction id assigned by the node.
    #[serde(default)]
    pub id: Option<String>,
    /// Remaining fields of the response.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Blocking node client.
pub trait NodeClient {
    /// Node version.
    fn node_version(&self) -> Result<VersionInfo>;

    /// Regular balance of `address`.
    fn balance(&self, address: &Address) -> Result<Balance>;

    /// Effective (generating) balance of `address`, leases included.
    fn effective_balance(&self, address: &Address) -> Result<Balance>;

    /// Resolve an alias name to its address.
    fn address_by_alias(&self, alias: &str) -> Result<Address>;

    /// Submit a signed transaction.
    fn broadcast(&self, transaction: &SignedTransaction) -> Result<BroadcastResult>;
}

/// Asynchronous node client.
#[async_trait]
pub trait AsyncNodeClient: Send + Sync {
    /// Node version.
    async fn node_version(&self) -> Result<VersionInfo>;

    /// Regular balance of `address`.
    async fn balance(&self, address: &Address) -> Result<Balance>;

    /// Effective (generating) balance of `address`, leases included.
    async fn effective_balance(&self, address: &Address) -> Result<Balance>;

    /// Resolve an alias name to its address.
    async fn address_by_alias(&self, alias: &str) -> Result<Address>;

    /// Submit a signed transaction.
    async fn broadcast(&self, transaction: &SignedTransaction) -> Result<BroadcastResult>;
}

macro_rules! forward_node_client {
    ($($ty:ty),*) => {$(
        impl<C: NodeClient + ?Sized> NodeClient for $ty {
            fn node_version(&self) -> Result<VersionInfo> {
                (**self).node_version()
            }

            fn balance(&self, address: &Address) -> Result<Balance> {
                (**self).balance(address)
            }

            fn effective_balance(&self, address: &Address) -> Result<Balance> {
                (**self).effective_balance(address)
            }

            fn address_by_alias(&self, alias: &str) -> Result<Address> {
                (**self).address_by_alias(alias)
            }

            fn broadcast(&self, transaction: &SignedTransaction) -> Result<BroadcastResult> {
                (**self).broadcast(transaction)
            }
        }

        #[async_trait]
        impl<C: AsyncNodeClient + ?Sized> AsyncNodeClient for $ty {
            async fn node_version(&self) -> Result<VersionInfo> {
                (**self).node_version().await
            }

            async fn balance(&self, address: &Address) -> Result<Balance> {
                (**self).balance(address).await
            }

            async fn effective_balance(&self, address: &Address) -> Result<Balance> {
                (**self).effective_balance(address).await
            }

            async fn address_by_alias(&self, alias: &str) -> Result<Address> {
                (**self).address_by_alias(alias).await
            }

            async fn broadcast(&self, transaction: &SignedTransaction) -> Result<BroadcastResult> {
                (**self).broadcast(transaction).await
            }
        }
    )*};
}

forward_node_client!(&C, Arc<C>, Box<C>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_deserializes_node_response() {
        let body = r#"{"address":"3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN","confirmations":0,"balance":12345}"#;
        let balance: Balance = serde_json::from_str(body).unwrap();
        assert_eq!(balance.balance, 12345);
        assert_eq!(
            balance.address.to_string(),
            "3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN"
        );
    }

    #[test]
    fn test_balance_rejects_bad_address() {
        let body = r#"{"address":"3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfM","balance":1}"#;
        assert!(serde_json::from_str::<Balance>(body).is_err());
    }

    #[test]
    fn test_broadcast_result_keeps_extra_fields() {
        let body = r#"{"id":"7ViWrUMCK9zh6sEtGszt31ELgd3rp9jeeP8YL57tQ2K","type":4,"fee":1}"#;
        let result: BroadcastResult = serde_json::from_str(body).unwrap();
        assert_eq!(
            result.id.as_deref(),
            Some("7ViWrUMCK9zh6sEtGszt31ELgd3rp9jeeP8YL57tQ2K")
        );
        assert_eq!(result.fields["type"], 4);
    }

    #[test]
    fn test_version_info() {
        let info: VersionInfo = serde_json::from_str(r#"{"version":"Acryl v1.0.2"}"#).unwrap();
        assert_eq!(info.version, "Acryl v1.0.2");
    }
}
