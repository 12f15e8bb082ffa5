//! Transactions: transfer, lease, lease cancel, alias, asset issue, reissue,
//! burn and mass transfer.
//!
//! A [`Transaction`] is built unsigned, turned into a [`SignedTransaction`] by
//! an identity holding the private key, and finally posted to the node as
//! JSON. The signature covers [`Transaction::body_bytes`]; the transaction id
//! is the BLAKE2b-256 hash of the same bytes.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::address::Address;
use crate::amount::{ensure_positive, DEFAULT_FEE};
use crate::encoding::to_base58;
use crate::error::{Error, Result};
use crate::hash::blake2b256;
use crate::keys::PublicKey;
use crate::network::Network;
use crate::signature::Signature;
use crate::types::Id;

/// Asset issue transaction type.
pub const ISSUE_TYPE: u8 = 3;
/// Transfer transaction type.
pub const TRANSFER_TYPE: u8 = 4;
/// Asset reissue transaction type.
pub const REISSUE_TYPE: u8 = 5;
/// Asset burn transaction type.
pub const BURN_TYPE: u8 = 6;
/// Lease transaction type.
pub const LEASE_TYPE: u8 = 8;
/// Lease cancel transaction type.
pub const CANCEL_LEASE_TYPE: u8 = 9;
/// Alias transaction type.
pub const ALIAS_TYPE: u8 = 10;
/// Mass transfer transaction type.
pub const MASS_TRANSFER_TYPE: u8 = 11;

/// Default fee for issuing or reissuing an asset: 1 ACRYL.
pub const ASSET_FEE: u64 = 100_000_000;
/// Mass transfer fee before per-recipient charges.
pub const MASS_TRANSFER_BASE_FEE: u64 = 100_000;
/// Charged for every started pair of mass transfer recipients.
pub const MASS_TRANSFER_STEP_FEE: u64 = 100_000;
/// Maximum number of recipients in one mass transfer.
pub const MAX_MASS_TRANSFERS: usize = 100;

/// Minimum asset name length in bytes.
pub const MIN_ASSET_NAME_LENGTH: usize = 4;
/// Maximum asset name length in bytes.
pub const MAX_ASSET_NAME_LENGTH: usize = 16;
/// Maximum asset description length in bytes.
pub const MAX_ASSET_DESCRIPTION_LENGTH: usize = 1000;
/// Maximum number of asset decimals.
pub const MAX_ASSET_DECIMALS: u8 = 8;

/// Maximum transfer attachment length in bytes.
pub const MAX_ATTACHMENT_LENGTH: usize = 140;

/// Minimum alias length.
pub const MIN_ALIAS_LENGTH: usize = 4;
/// Maximum alias length.
pub const MAX_ALIAS_LENGTH: usize = 30;

const ALIAS_VERSION: u8 = 2;
const MASS_TRANSFER_VERSION: u8 = 1;

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Transfer of the native token or an asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Recipient address.
    pub recipient: Address,
    /// Amount in base units.
    pub amount: u64,
    /// Asset to transfer; `None` for the native token.
    pub asset_id: Option<Id>,
    /// Asset the fee is paid in; `None` for the native token.
    pub fee_asset_id: Option<Id>,
    /// Free-form attachment, at most [`MAX_ATTACHMENT_LENGTH`] bytes.
    pub attachment: Vec<u8>,
}

/// Lease of the native token to another account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lease {
    /// Lease recipient.
    pub recipient: Address,
    /// Leased amount in base units.
    pub amount: u64,
}

/// Cancellation of an earlier lease.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelLease {
    /// Id of the lease transaction.
    pub lease_id: Id,
}

/// Human-readable alias for the sender's address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    name: String,
}

impl Alias {
    /// Validate an alias name: 4 to 30 characters of `-.0-9@_a-z`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let allowed = |c: char| matches!(c, '-' | '.' | '0'..='9' | '@' | '_' | 'a'..='z');
        if !(MIN_ALIAS_LENGTH..=MAX_ALIAS_LENGTH).contains(&name.len()) || !name.chars().all(allowed)
        {
            return Err(Error::InvalidAlias(name));
        }
        Ok(Self { name })
    }

    /// Alias name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A new asset issued by the sender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    name: String,
    description: String,
    quantity: u64,
    decimals: u8,
    reissuable: bool,
}

impl Issue {
    /// Validate asset parameters.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] for a non-positive quantity and
    /// [`Error::InvalidTransaction`] for a name outside 4 to 16 bytes, a
    /// description over 1000 bytes or more than 8 decimals.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        decimals: u8,
        reissuable: bool,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();
        let quantity = ensure_positive("quantity", quantity)?;
        if !(MIN_ASSET_NAME_LENGTH..=MAX_ASSET_NAME_LENGTH).contains(&name.len()) {
            return Err(Error::InvalidTransaction(format!(
                "asset name must be {MIN_ASSET_NAME_LENGTH} to {MAX_ASSET_NAME_LENGTH} bytes, got {}",
                name.len()
            )));
        }
        if description.len() > MAX_ASSET_DESCRIPTION_LENGTH {
            return Err(Error::InvalidTransaction(format!(
                "asset description is {} bytes, maximum is {MAX_ASSET_DESCRIPTION_LENGTH}",
                description.len()
            )));
        }
        if decimals > MAX_ASSET_DECIMALS {
            return Err(Error::InvalidTransaction(format!(
                "asset decimals {decimals} exceed {MAX_ASSET_DECIMALS}"
            )));
        }
        Ok(Self {
            name,
            description,
            quantity,
            decimals,
            reissuable,
        })
    }

    /// Asset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asset description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Issued quantity in the asset's smallest unit.
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Decimal places.
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Whether more units can be issued later.
    pub const fn reissuable(&self) -> bool {
        self.reissuable
    }
}

/// Additional units of an existing reissuable asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reissue {
    /// Asset to reissue.
    pub asset_id: Id,
    /// Quantity added.
    pub quantity: u64,
    /// Whether the asset stays reissuable.
    pub reissuable: bool,
}

/// Destruction of asset units held by the sender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Burn {
    /// Asset to burn.
    pub asset_id: Id,
    /// Quantity destroyed.
    pub quantity: u64,
}

/// One recipient of a mass transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MassTransferItem {
    /// Recipient address.
    pub recipient: Address,
    /// Amount in base units.
    pub amount: u64,
}

/// Transfer of one token to many recipients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MassTransfer {
    /// Asset to transfer; `None` for the native token.
    pub asset_id: Option<Id>,
    /// Recipients and amounts, at most [`MAX_MASS_TRANSFERS`].
    pub transfers: Vec<MassTransferItem>,
    /// Free-form attachment, at most [`MAX_ATTACHMENT_LENGTH`] bytes.
    pub attachment: Vec<u8>,
}

/// Default mass transfer fee for `count` recipients.
pub const fn mass_transfer_fee(count: usize) -> u64 {
    MASS_TRANSFER_BASE_FEE + count.div_ceil(2) as u64 * MASS_TRANSFER_STEP_FEE
}

/// The kind-specific part of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    /// Type 3.
    Issue(Issue),
    /// Type 4.
    Transfer(Transfer),
    /// Type 5.
    Reissue(Reissue),
    /// Type 6.
    Burn(Burn),
    /// Type 8.
    Lease(Lease),
    /// Type 9.
    CancelLease(CancelLease),
    /// Type 10.
    Alias(Alias),
    /// Type 11.
    MassTransfer(MassTransfer),
}

impl TransactionKind {
    /// Numeric transaction type.
    pub const fn type_id(&self) -> u8 {
        match self {
            Self::Issue(_) => ISSUE_TYPE,
            Self::Transfer(_) => TRANSFER_TYPE,
            Self::Reissue(_) => REISSUE_TYPE,
            Self::Burn(_) => BURN_TYPE,
            Self::Lease(_) => LEASE_TYPE,
            Self::CancelLease(_) => CANCEL_LEASE_TYPE,
            Self::Alias(_) => ALIAS_TYPE,
            Self::MassTransfer(_) => MASS_TRANSFER_TYPE,
        }
    }

    /// Fee used when the caller does not pick one.
    pub fn default_fee(&self) -> u64 {
        match self {
            Self::Issue(_) | Self::Reissue(_) => ASSET_FEE,
            Self::MassTransfer(m) => mass_transfer_fee(m.transfers.len()),
            Self::Transfer(_)
            | Self::Burn(_)
            | Self::Lease(_)
            | Self::CancelLease(_)
            | Self::Alias(_) => DEFAULT_FEE,
        }
    }

    /// Node endpoint accepting this kind.
    pub const fn broadcast_path(&self) -> &'static str {
        match self {
            Self::Issue(_) => "/assets/broadcast/issue",
            Self::Transfer(_) => "/assets/broadcast/transfer",
            Self::Reissue(_) => "/assets/broadcast/reissue",
            Self::Burn(_) => "/assets/broadcast/burn",
            Self::Lease(_) => "/leasing/broadcast/lease",
            Self::CancelLease(_) => "/leasing/broadcast/cancel",
            Self::Alias(_) => "/alias/broadcast/create",
            Self::MassTransfer(_) => "/transactions/broadcast",
        }
    }

    /// Short lowercase name, used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Issue(_) => "issue",
            Self::Transfer(_) => "transfer",
            Self::Reissue(_) => "reissue",
            Self::Burn(_) => "burn",
            Self::Lease(_) => "lease",
            Self::CancelLease(_) => "cancel lease",
            Self::Alias(_) => "alias",
            Self::MassTransfer(_) => "mass transfer",
        }
    }
}

/// Parameters for a transfer with optional asset, fee asset, attachment and
/// timestamp.
///
/// Amount and fee are signed so that negative inputs can be reported as
/// [`Error::InvalidAmount`] instead of wrapping.
#[derive(Clone, Debug)]
pub struct TransferParams {
    /// Recipient address.
    pub recipient: Address,
    /// Amount in base units.
    pub amount: i64,
    /// Fee in base units; defaults to [`DEFAULT_FEE`].
    pub fee: Option<i64>,
    /// Asset to transfer.
    pub asset_id: Option<Id>,
    /// Asset to pay the fee in.
    pub fee_asset_id: Option<Id>,
    /// Attachment bytes.
    pub attachment: Vec<u8>,
    /// Explicit timestamp in milliseconds; defaults to now.
    pub timestamp: Option<u64>,
}

impl TransferParams {
    /// Native token transfer with default fee and no attachment.
    pub fn new(recipient: Address, amount: i64) -> Self {
        Self {
            recipient,
            amount,
            fee: None,
            asset_id: None,
            fee_asset_id: None,
            attachment: Vec::new(),
            timestamp: None,
        }
    }

    /// Set the fee.
    #[must_use]
    pub fn fee(mut self, fee: i64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Transfer an asset instead of the native token.
    #[must_use]
    pub fn asset(mut self, asset_id: Id) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Pay the fee in an asset.
    #[must_use]
    pub fn fee_asset(mut self, fee_asset_id: Id) -> Self {
        self.fee_asset_id = Some(fee_asset_id);
        self
    }

    /// Attach bytes to the transfer.
    #[must_use]
    pub fn attachment(mut self, attachment: impl Into<Vec<u8>>) -> Self {
        self.attachment = attachment.into();
        self
    }

    /// Fix the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate the parameters and build the unsigned transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] for a non-positive amount or fee and
    /// [`Error::InvalidAttachment`] for an oversized attachment.
    pub fn build(self, sender: PublicKey, network: Network) -> Result<Transaction> {
        let amount = ensure_positive("amount", self.amount)?;
        let fee = resolve_fee(self.fee, DEFAULT_FEE)?;
        check_attachment(&self.attachment)?;
        let kind = TransactionKind::Transfer(Transfer {
            recipient: self.recipient,
            amount,
            asset_id: self.asset_id,
            fee_asset_id: self.fee_asset_id,
            attachment: self.attachment,
        });
        Ok(Transaction::new(
            sender,
            network,
            kind,
            fee,
            self.timestamp.unwrap_or_else(now_millis),
        ))
    }
}

/// Parameters for a mass transfer.
///
/// Amounts and fee are signed for the same reason as in [`TransferParams`].
#[derive(Clone, Debug)]
pub struct MassTransferParams {
    /// Recipients and amounts in base units.
    pub transfers: Vec<(Address, i64)>,
    /// Asset to transfer.
    pub asset_id: Option<Id>,
    /// Attachment bytes.
    pub attachment: Vec<u8>,
    /// Fee in base units; defaults to [`mass_transfer_fee`].
    pub fee: Option<i64>,
    /// Explicit timestamp in milliseconds; defaults to now.
    pub timestamp: Option<u64>,
}

impl MassTransferParams {
    /// Native token mass transfer with default fee and no attachment.
    pub fn new(transfers: impl IntoIterator<Item = (Address, i64)>) -> Self {
        Self {
            transfers: transfers.into_iter().collect(),
            asset_id: None,
            attachment: Vec::new(),
            fee: None,
            timestamp: None,
        }
    }

    /// Set the fee.
    #[must_use]
    pub fn fee(mut self, fee: i64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Transfer an asset instead of the native token.
    #[must_use]
    pub fn asset(mut self, asset_id: Id) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    /// Attach bytes to the transfer.
    #[must_use]
    pub fn attachment(mut self, attachment: impl Into<Vec<u8>>) -> Self {
        self.attachment = attachment.into();
        self
    }

    /// Fix the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate the parameters and build the unsigned transaction.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTransaction`] for an empty list or more than
    /// [`MAX_MASS_TRANSFERS`] recipients, [`Error::InvalidAmount`] for a
    /// non-positive amount or fee and [`Error::InvalidAttachment`] for an
    /// oversized attachment.
    pub fn build(self, sender: PublicKey, network: Network) -> Result<Transaction> {
        let count = self.transfers.len();
        if count == 0 || count > MAX_MASS_TRANSFERS {
            return Err(Error::InvalidTransaction(format!(
                "mass transfer needs 1 to {MAX_MASS_TRANSFERS} recipients, got {count}"
            )));
        }
        let transfers = self
            .transfers
            .into_iter()
            .map(|(recipient, amount)| {
                Ok(MassTransferItem {
                    recipient,
                    amount: ensure_positive("amount", amount)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let fee = resolve_fee(self.fee, mass_transfer_fee(count))?;
        check_attachment(&self.attachment)?;

        let kind = TransactionKind::MassTransfer(MassTransfer {
            asset_id: self.asset_id,
            transfers,
            attachment: self.attachment,
        });
        Ok(Transaction::new(
            sender,
            network,
            kind,
            fee,
            self.timestamp.unwrap_or_else(now_millis),
        ))
    }
}

/// Apply `default` when no fee is given and reject non-positive fees.
pub(crate) fn resolve_fee(fee: Option<i64>, default: u64) -> Result<u64> {
    match fee {
        Some(fee) => ensure_positive("fee", fee),
        None => Ok(default),
    }
}

fn check_attachment(attachment: &[u8]) -> Result<()> {
    if attachment.len() > MAX_ATTACHMENT_LENGTH {
        return Err(Error::InvalidAttachment {
            len: attachment.len(),
            max: MAX_ATTACHMENT_LENGTH,
        });
    }
    Ok(())
}

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    sender_public_key: PublicKey,
    sender: Address,
    kind: TransactionKind,
    fee: u64,
    timestamp: u64,
}

impl Transaction {
    /// Create a transaction sent by `sender_public_key` on `network`.
    pub fn new(
        sender_public_key: PublicKey,
        network: Network,
        kind: TransactionKind,
        fee: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            sender: sender_public_key.to_address(network),
            sender_public_key,
            kind,
            fee,
            timestamp,
        }
    }

    /// Sender public key.
    pub const fn sender_public_key(&self) -> &PublicKey {
        &self.sender_public_key
    }

    /// Sender address.
    pub const fn sender(&self) -> &Address {
        &self.sender
    }

    /// Kind-specific data.
    pub const fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Fee in base units.
    pub const fn fee(&self) -> u64 {
        self.fee
    }

    /// Timestamp in milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Recipient, for transfers and leases.
    pub const fn recipient(&self) -> Option<&Address> {
        match &self.kind {
            TransactionKind::Transfer(t) => Some(&t.recipient),
            TransactionKind::Lease(l) => Some(&l.recipient),
            _ => None,
        }
    }

    /// Every address receiving funds, including all mass transfer recipients.
    pub fn recipients(&self) -> Vec<&Address> {
        match &self.kind {
            TransactionKind::MassTransfer(m) => m.transfers.iter().map(|t| &t.recipient).collect(),
            _ => self.recipient().into_iter().collect(),
        }
    }

    /// Amount, for transfers and leases.
    pub const fn amount(&self) -> Option<u64> {
        match &self.kind {
            TransactionKind::Transfer(t) => Some(t.amount),
            TransactionKind::Lease(l) => Some(l.amount),
            _ => None,
        }
    }

    /// Bytes covered by the signature.
    pub fn body_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(128);
        buf.push(self.kind.type_id());
        if let TransactionKind::MassTransfer(_) = &self.kind {
            buf.push(MASS_TRANSFER_VERSION);
        }
        buf.extend_from_slice(self.sender_public_key.as_bytes());

        match &self.kind {
            TransactionKind::Issue(i) => {
                put_short_bytes(&mut buf, i.name.as_bytes());
                put_short_bytes(&mut buf, i.description.as_bytes());
                buf.extend_from_slice(&i.quantity.to_be_bytes());
                buf.push(i.decimals);
                buf.push(u8::from(i.reissuable));
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
            }
            TransactionKind::Reissue(r) => {
                buf.extend_from_slice(r.asset_id.as_bytes());
                buf.extend_from_slice(&r.quantity.to_be_bytes());
                buf.push(u8::from(r.reissuable));
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
            }
            TransactionKind::Burn(b) => {
                buf.extend_from_slice(b.asset_id.as_bytes());
                buf.extend_from_slice(&b.quantity.to_be_bytes());
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
            }
            TransactionKind::MassTransfer(m) => {
                put_optional_id(&mut buf, m.asset_id.as_ref());
                buf.extend_from_slice(&(m.transfers.len() as u16).to_be_bytes());
                for item in &m.transfers {
                    buf.extend_from_slice(item.recipient.as_bytes());
                    buf.extend_from_slice(&item.amount.to_be_bytes());
                }
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
                buf.extend_from_slice(&self.fee.to_be_bytes());
                put_short_bytes(&mut buf, &m.attachment);
            }
            TransactionKind::Transfer(t) => {
                put_optional_id(&mut buf, t.asset_id.as_ref());
                put_optional_id(&mut buf, t.fee_asset_id.as_ref());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
                buf.extend_from_slice(&t.amount.to_be_bytes());
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(t.recipient.as_bytes());
                put_short_bytes(&mut buf, &t.attachment);
            }
            TransactionKind::Lease(l) => {
                buf.extend_from_slice(l.recipient.as_bytes());
                buf.extend_from_slice(&l.amount.to_be_bytes());
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
            }
            TransactionKind::CancelLease(c) => {
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
                buf.extend_from_slice(c.lease_id.as_bytes());
            }
            TransactionKind::Alias(a) => {
                let mut alias = Vec::with_capacity(4 + a.name.len());
                alias.push(ALIAS_VERSION);
                alias.push(self.sender.network().chain_id());
                put_short_bytes(&mut alias, a.name.as_bytes());
                put_short_bytes(&mut buf, &alias);
                buf.extend_from_slice(&self.fee.to_be_bytes());
                buf.extend_from_slice(&self.timestamp.to_be_bytes());
            }
        }
        buf
    }

    /// Transaction id: BLAKE2b-256 of the body bytes.
    pub fn id(&self) -> Id {
        Id::from_bytes(blake2b256(&self.body_bytes()))
    }
}

fn put_optional_id(buf: &mut Vec<u8>, id: Option<&Id>) {
    match id {
        Some(id) => {
            buf.push(1);
            buf.extend_from_slice(id.as_bytes());
        }
        None => buf.push(0),
    }
}

// Callers bound every length (attachment, alias, asset name and description)
// well below u16::MAX.
fn put_short_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// A transaction together with its signature, ready to broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
}

impl SignedTransaction {
    /// Pair a transaction with a signature over its body bytes.
    ///
    /// Nothing is checked here; use [`SignedTransaction::verify`].
    pub const fn new(transaction: Transaction, signature: Signature) -> Self {
        Self {
            transaction,
            signature,
        }
    }

    /// The unsigned part.
    pub const fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Sender address.
    pub const fn sender(&self) -> &Address {
        self.transaction.sender()
    }

    /// Recipient, for transfers and leases.
    pub const fn recipient(&self) -> Option<&Address> {
        self.transaction.recipient()
    }

    /// Every address receiving funds.
    pub fn recipients(&self) -> Vec<&Address> {
        self.transaction.recipients()
    }

    /// Transaction id.
    pub fn id(&self) -> Id {
        self.transaction.id()
    }

    /// Node endpoint for this transaction.
    pub const fn broadcast_path(&self) -> &'static str {
        self.transaction.kind.broadcast_path()
    }

    /// Check the signature against the sender public key.
    pub fn verify(&self) -> bool {
        self.transaction
            .sender_public_key
            .verify(&self.transaction.body_bytes(), &self.signature)
    }

    /// JSON payload accepted by the node's broadcast endpoint.
    pub fn to_json(&self) -> Value {
        let tx = &self.transaction;
        let mut map = Map::new();
        map.insert("senderPublicKey".into(), json!(tx.sender_public_key.to_base58()));

        match &tx.kind {
            TransactionKind::Transfer(t) => {
                map.insert("recipient".into(), json!(t.recipient.to_string()));
                map.insert("amount".into(), json!(t.amount));
                if let Some(asset_id) = &t.asset_id {
                    map.insert("assetId".into(), json!(asset_id.to_string()));
                }
                if let Some(fee_asset_id) = &t.fee_asset_id {
                    map.insert("feeAssetId".into(), json!(fee_asset_id.to_string()));
                }
                map.insert("attachment".into(), json!(to_base58(&t.attachment)));
            }
            TransactionKind::Lease(l) => {
                map.insert("recipient".into(), json!(l.recipient.to_string()));
                map.insert("amount".into(), json!(l.amount));
            }
            TransactionKind::CancelLease(c) => {
                map.insert("txId".into(), json!(c.lease_id.to_string()));
            }
            TransactionKind::Alias(a) => {
                map.insert("alias".into(), json!(a.name));
            }
            TransactionKind::Issue(i) => {
                map.insert("name".into(), json!(i.name));
                map.insert("description".into(), json!(i.description));
                map.insert("quantity".into(), json!(i.quantity));
                map.insert("decimals".into(), json!(i.decimals));
                map.insert("reissuable".into(), json!(i.reissuable));
            }
            TransactionKind::Reissue(r) => {
                map.insert("assetId".into(), json!(r.asset_id.to_string()));
                map.insert("quantity".into(), json!(r.quantity));
                map.insert("reissuable".into(), json!(r.reissuable));
            }
            TransactionKind::Burn(b) => {
                map.insert("assetId".into(), json!(b.asset_id.to_string()));
                map.insert("quantity".into(), json!(b.quantity));
            }
            TransactionKind::MassTransfer(m) => {
                // The generic broadcast endpoint needs type and version.
                map.insert("type".into(), json!(MASS_TRANSFER_TYPE));
                map.insert("version".into(), json!(MASS_TRANSFER_VERSION));
                map.insert(
                    "assetId".into(),
                    json!(m.asset_id.as_ref().map(ToString::to_string)),
                );
                let transfers: Vec<Value> = m
                    .transfers
                    .iter()
                    .map(|t| json!({ "recipient": t.recipient.to_string(), "amount": t.amount }))
                    .collect();
                map.insert("transfers".into(), Value::Array(transfers));
                map.insert("attachment".into(), json!(to_base58(&m.attachment)));
            }
        }

        map.insert("fee".into(), json!(tx.fee));
        map.insert("timestamp".into(), json!(tx.timestamp));
        let signature = self.signature.to_base58();
        if let TransactionKind::MassTransfer(_) = tx.kind {
            map.insert("proofs".into(), json!([signature]));
        } else {
            map.insert("signature".into(), json!(signature));
        }
        Value::Object(map)
    }
}

impl Serialize for SignedTransaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
