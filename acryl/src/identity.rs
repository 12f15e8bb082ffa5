//! Account identities.
//!
//! [`AddressIdentity`] owns the key material of one account and builds signed
//! transactions. It never talks to a node itself; attach a collaborator with
//! [`AddressIdentity::connect`] or [`AddressIdentity::connect_async`] to query
//! balances and broadcast.

use tracing::{debug, info};

use crate::address::Address;
use crate::amount::ensure_positive;
use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::network::Network;
use crate::node::{AsyncNodeClient, Balance, BroadcastResult, NodeClient, VersionInfo};
use crate::seed::Seed;
use crate::signature::Signature;
use crate::transaction::{
    now_millis, resolve_fee, Alias, Burn, CancelLease, Issue, Lease, MassTransferParams, Reissue,
    SignedTransaction, Transaction, TransactionKind, TransferParams,
};
use crate::types::Id;

/// Where an identity's key material comes from.
#[derive(Clone, Debug)]
pub enum KeySource {
    /// Fresh random 15-word seed phrase, nonce 0.
    Random,
    /// Seed phrase and account nonce.
    Seed(Seed),
    /// Existing private key.
    PrivateKey(PrivateKey),
    /// Public key only; the identity is watch-only.
    PublicKey(PublicKey),
}

impl KeySource {
    /// Seed phrase with nonce 0.
    pub fn seed(phrase: impl Into<String>) -> Self {
        Self::Seed(Seed::new(phrase, 0))
    }

    /// Pick a key source from optional inputs.
    ///
    /// No input means [`KeySource::Random`]. Several inputs are accepted only
    /// if they all describe the same public key, in which case the most
    /// capable one wins (seed, then private key, then public key).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyMaterial`] if the inputs disagree.
    pub fn resolve(
        seed: Option<Seed>,
        private_key: Option<PrivateKey>,
        public_key: Option<PublicKey>,
    ) -> Result<Self> {
        let derived = [
            seed.as_ref().map(|s| s.private_key().public_key()),
            private_key.as_ref().map(PrivateKey::public_key),
            public_key,
        ];
        let mut present = derived.iter().flatten();
        if let Some(first) = present.next() {
            if present.any(|other| other != first) {
                return Err(Error::key_material(
                    "seed, private key and public key do not belong to the same account",
                ));
            }
        }

        Ok(match (seed, private_key, public_key) {
            (Some(seed), _, _) => Self::Seed(seed),
            (None, Some(private_key), _) => Self::PrivateKey(private_key),
            (None, None, Some(public_key)) => Self::PublicKey(public_key),
            (None, None, None) => Self::Random,
        })
    }
}

/// One account: key material, address and network.
#[derive(Clone, Debug)]
pub struct AddressIdentity {
    seed: Option<Seed>,
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
    address: Address,
    network: Network,
}

impl AddressIdentity {
    /// Derive an identity from `source` on `network`.
    ///
    /// # Errors
    ///
    /// Fails only for [`KeySource::Random`] when the OS random source fails.
    pub fn generate(source: KeySource, network: Network) -> Result<Self> {
        let (seed, private_key, public_key) = match source {
            KeySource::Random => {
                let seed = Seed::random(0)?;
                let private_key = seed.private_key();
                let public_key = private_key.public_key();
                (Some(seed), Some(private_key), public_key)
            }
            KeySource::Seed(seed) => {
                let private_key = seed.private_key();
                let public_key = private_key.public_key();
                (Some(seed), Some(private_key), public_key)
            }
            KeySource::PrivateKey(private_key) => {
                let public_key = private_key.public_key();
                (None, Some(private_key), public_key)
            }
            KeySource::PublicKey(public_key) => (None, None, public_key),
        };

        let address = public_key.to_address(network);
        debug!(%address, %network, watch_only = private_key.is_none(), "identity derived");
        Ok(Self {
            seed,
            private_key,
            public_key,
            address,
            network,
        })
    }

    /// Account address.
    #[inline]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Account public key.
    #[inline]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Private key, absent for watch-only identities.
    #[inline]
    pub const fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Seed the identity was derived from, if any.
    #[inline]
    pub const fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    /// Network the address belongs to.
    #[inline]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Whether the identity can only observe, not sign.
    #[inline]
    pub const fn is_watch_only(&self) -> bool {
        self.private_key.is_none()
    }

    /// Check an address string against this identity's network.
    ///
    /// Returns `false` for anything malformed; never panics.
    pub fn validate(&self, address: &str) -> bool {
        Address::is_valid(address, self.network)
    }

    fn signing_key(&self) -> Result<&PrivateKey> {
        self.private_key.as_ref().ok_or(Error::MissingPrivateKey)
    }

    /// Sign a transaction sent by this identity.
    ///
    /// # Errors
    ///
    /// [`Error::MissingPrivateKey`] for watch-only identities,
    /// [`Error::InvalidKeyMaterial`] if the transaction names another sender
    /// and [`Error::InvalidAddress`] if the sender or any recipient belongs to
    /// another network.
    pub fn sign(&self, transaction: Transaction) -> Result<SignedTransaction> {
        let key = self.signing_key()?;
        if transaction.sender_public_key() != &self.public_key {
            return Err(Error::key_material("transaction sender is not this identity"));
        }
        let sender_network = transaction.sender().network();
        if sender_network != self.network {
            return Err(Error::InvalidAddress(format!(
                "transaction was built for {sender_network}, identity is on {}",
                self.network
            )));
        }
        if let Some(foreign) = transaction
            .recipients()
            .into_iter()
            .find(|r| r.network() != self.network)
        {
            return Err(Error::InvalidAddress(format!(
                "recipient {foreign} is on {}, expected {}",
                foreign.network(),
                self.network
            )));
        }
        let signature = key.sign(&transaction.body_bytes())?;
        debug!(
            kind = transaction.kind().name(),
            id = %transaction.id(),
            "transaction signed"
        );
        Ok(SignedTransaction::new(transaction, signature))
    }

    /// Check a signed transaction against its embedded sender key.
    pub fn verify(&self, transaction: &SignedTransaction) -> bool {
        transaction.verify()
    }

    /// Sign arbitrary bytes.
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.signing_key()?.sign(message)
    }

    /// Verify a signature over arbitrary bytes against this identity's key.
    pub fn verify_message(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Build and sign a native token transfer.
    ///
    /// `fee` defaults to 100 000 base units.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] for a non-positive amount or fee, checked
    /// before anything is signed.
    pub fn transfer(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<SignedTransaction> {
        let mut params = TransferParams::new(*recipient, amount);
        params.fee = fee;
        self.transfer_with(params)
    }

    /// Build and sign a transfer with asset, attachment or timestamp options.
    pub fn transfer_with(&self, params: TransferParams) -> Result<SignedTransaction> {
        self.signing_key()?;
        let transaction = params.build(self.public_key, self.network)?;
        self.sign(transaction)
    }

    /// Build and sign a lease.
    pub fn lease(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<SignedTransaction> {
        let amount = ensure_positive("amount", amount)?;
        let kind = TransactionKind::Lease(Lease {
            recipient: *recipient,
            amount,
        });
        self.sign_kind(kind, fee)
    }

    /// Build and sign a lease cancellation.
    pub fn cancel_lease(&self, lease_id: Id, fee: Option<i64>) -> Result<SignedTransaction> {
        self.sign_kind(TransactionKind::CancelLease(CancelLease { lease_id }), fee)
    }

    /// Build and sign an alias registration.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAlias`] if the name is outside 4 to 30 characters of
    /// `-.0-9@_a-z`.
    pub fn create_alias(&self, alias: &str, fee: Option<i64>) -> Result<SignedTransaction> {
        self.sign_kind(TransactionKind::Alias(Alias::new(alias)?), fee)
    }

    /// Build and sign a new asset.
    ///
    /// `fee` defaults to 1 ACRYL.
    pub fn issue(&self, asset: Issue, fee: Option<i64>) -> Result<SignedTransaction> {
        self.sign_kind(TransactionKind::Issue(asset), fee)
    }

    /// Build and sign a reissue of `asset_id`.
    pub fn reissue(
        &self,
        asset_id: Id,
        quantity: i64,
        reissuable: bool,
        fee: Option<i64>,
    ) -> Result<SignedTransaction> {
        let quantity = ensure_positive("quantity", quantity)?;
        let kind = TransactionKind::Reissue(Reissue {
            asset_id,
            quantity,
            reissuable,
        });
        self.sign_kind(kind, fee)
    }

    /// Build and sign a burn of `quantity` units of `asset_id`.
    pub fn burn(&self, asset_id: Id, quantity: i64, fee: Option<i64>) -> Result<SignedTransaction> {
        let quantity = ensure_positive("quantity", quantity)?;
        self.sign_kind(TransactionKind::Burn(Burn { asset_id, quantity }), fee)
    }

    /// Build and sign a mass transfer.
    ///
    /// The default fee grows with the number of recipients, see
    /// [`mass_transfer_fee`](crate::transaction::mass_transfer_fee).
    pub fn mass_transfer(&self, params: MassTransferParams) -> Result<SignedTransaction> {
        self.signing_key()?;
        let transaction = params.build(self.public_key, self.network)?;
        self.sign(transaction)
    }

    fn sign_kind(&self, kind: TransactionKind, fee: Option<i64>) -> Result<SignedTransaction> {
        let fee = resolve_fee(fee, kind.default_fee())?;
        self.signing_key()?;
        let transaction = Transaction::new(self.public_key, self.network, kind, fee, now_millis());
        self.sign(transaction)
    }

    /// Attach a blocking node client.
    pub fn connect<C: NodeClient>(self, client: C) -> ConnectedIdentity<C> {
        ConnectedIdentity {
            identity: self,
            client,
        }
    }

    /// Attach an asynchronous node client.
    pub fn connect_async<C: AsyncNodeClient>(self, client: C) -> AsyncConnectedIdentity<C> {
        AsyncConnectedIdentity {
            identity: self,
            client,
        }
    }
}

fn log_broadcast(signed: &SignedTransaction, result: &BroadcastResult) {
    info!(
        kind = signed.transaction().kind().name(),
        id = %signed.id(),
        node_id = result.id.as_deref().unwrap_or("-"),
        "transaction broadcast"
    );
}

/// An identity bound to a blocking node client.
#[derive(Debug)]
pub struct ConnectedIdentity<C> {
    identity: AddressIdentity,
    client: C,
}

impl<C: NodeClient> ConnectedIdentity<C> {
    /// The wrapped identity, for signing and validation.
    pub const fn identity(&self) -> &AddressIdentity {
        &self.identity
    }

    /// The node client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Split into identity and client.
    pub fn into_parts(self) -> (AddressIdentity, C) {
        (self.identity, self.client)
    }

    /// Account address.
    pub const fn address(&self) -> &Address {
        self.identity.address()
    }

    /// Current balance of this account.
    pub fn balance(&self) -> Result<Balance> {
        self.client.balance(&self.identity.address)
    }

    /// Effective balance of this account.
    pub fn effective_balance(&self) -> Result<Balance> {
        self.client.effective_balance(&self.identity.address)
    }

    /// Resolve an alias to an address.
    pub fn resolve_alias(&self, alias: &str) -> Result<Address> {
        self.client.address_by_alias(alias)
    }

    /// Version of the connected node.
    pub fn node_version(&self) -> Result<VersionInfo> {
        self.client.node_version()
    }

    /// Broadcast an already signed transaction.
    pub fn broadcast(&self, signed: &SignedTransaction) -> Result<BroadcastResult> {
        let result = self.client.broadcast(signed)?;
        log_broadcast(signed, &result);
        Ok(result)
    }

    /// Sign a transfer and broadcast it.
    pub fn transfer(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.transfer(recipient, amount, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a transfer built from `params` and broadcast it.
    pub fn transfer_with(&self, params: TransferParams) -> Result<BroadcastResult> {
        let signed = self.identity.transfer_with(params)?;
        self.broadcast(&signed)
    }

    /// Sign a lease and broadcast it.
    pub fn lease(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.lease(recipient, amount, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a lease cancellation and broadcast it.
    pub fn cancel_lease(&self, lease_id: Id, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.cancel_lease(lease_id, fee)?;
        self.broadcast(&signed)
    }

    /// Sign an alias registration and broadcast it.
    pub fn create_alias(&self, alias: &str, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.create_alias(alias, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a new asset and broadcast it.
    pub fn issue(&self, asset: Issue, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.issue(asset, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a reissue and broadcast it.
    pub fn reissue(
        &self,
        asset_id: Id,
        quantity: i64,
        reissuable: bool,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.reissue(asset_id, quantity, reissuable, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a burn and broadcast it.
    pub fn burn(
        &self,
        asset_id: Id,
        quantity: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.burn(asset_id, quantity, fee)?;
        self.broadcast(&signed)
    }

    /// Sign a mass transfer and broadcast it.
    pub fn mass_transfer(&self, params: MassTransferParams) -> Result<BroadcastResult> {
        let signed = self.identity.mass_transfer(params)?;
        self.broadcast(&signed)
    }
}

/// An identity bound to an asynchronous node client.
///
/// Signing stays synchronous; only node calls suspend.
#[derive(Debug)]
pub struct AsyncConnectedIdentity<C> {
    identity: AddressIdentity,
    client: C,
}

impl<C: AsyncNodeClient> AsyncConnectedIdentity<C> {
    /// The wrapped identity, for signing and validation.
    pub const fn identity(&self) -> &AddressIdentity {
        &self.identity
    }

    /// The node client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Split into identity and client.
    pub fn into_parts(self) -> (AddressIdentity, C) {
        (self.identity, self.client)
    }

    /// Account address.
    pub const fn address(&self) -> &Address {
        self.identity.address()
    }

    /// Current balance of this account.
    pub async fn balance(&self) -> Result<Balance> {
        self.client.balance(&self.identity.address).await
    }

    /// Effective balance of this account.
    pub async fn effective_balance(&self) -> Result<Balance> {
        self.client.effective_balance(&self.identity.address).await
    }

    /// Resolve an alias to an address.
    pub async fn resolve_alias(&self, alias: &str) -> Result<Address> {
        self.client.address_by_alias(alias).await
    }

    /// Version of the connected node.
    pub async fn node_version(&self) -> Result<VersionInfo> {
        self.client.node_version().await
    }

    /// Broadcast an already signed transaction.
    pub async fn broadcast(&self, signed: &SignedTransaction) -> Result<BroadcastResult> {
        let result = self.client.broadcast(signed).await?;
        log_broadcast(signed, &result);
        Ok(result)
    }

    /// Sign a transfer and broadcast it.
    pub async fn transfer(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.transfer(recipient, amount, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a transfer built from `params` and broadcast it.
    pub async fn transfer_with(&self, params: TransferParams) -> Result<BroadcastResult> {
        let signed = self.identity.transfer_with(params)?;
        self.broadcast(&signed).await
    }

    /// Sign a lease and broadcast it.
    pub async fn lease(
        &self,
        recipient: &Address,
        amount: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.lease(recipient, amount, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a lease cancellation and broadcast it.
    pub async fn cancel_lease(&self, lease_id: Id, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.cancel_lease(lease_id, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign an alias registration and broadcast it.
    pub async fn create_alias(&self, alias: &str, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.create_alias(alias, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a new asset and broadcast it.
    pub async fn issue(&self, asset: Issue, fee: Option<i64>) -> Result<BroadcastResult> {
        let signed = self.identity.issue(asset, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a reissue and broadcast it.
    pub async fn reissue(
        &self,
        asset_id: Id,
        quantity: i64,
        reissuable: bool,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.reissue(asset_id, quantity, reissuable, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a burn and broadcast it.
    pub async fn burn(
        &self,
        asset_id: Id,
        quantity: i64,
        fee: Option<i64>,
    ) -> Result<BroadcastResult> {
        let signed = self.identity.burn(asset_id, quantity, fee)?;
        self.broadcast(&signed).await
    }

    /// Sign a mass transfer and broadcast it.
    pub async fn mass_transfer(&self, params: MassTransferParams) -> Result<BroadcastResult> {
        let signed = self.identity.mass_transfer(params)?;
        self.broadcast(&signed).await
    }
}
