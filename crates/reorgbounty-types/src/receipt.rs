//! Audit-trail receipts for the ReorgBounty registry.
//!
//! Every significant action (request created, superseded, claimed, expired)
//! produces a [`Receipt`] whose payload hash commits to the exact state
//! change, forming an append-only audit trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, BlockHeight, ReceiptId, Result};

/// The type of action this receipt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptType {
    /// A request was created and its reward escrowed.
    RequestCreated,
    /// An open request was refunded and replaced by a new one from the
    /// same requester.
    RequestSuperseded,
    /// A claim resolved the request; the reward was paid to the claimant.
    RewardClaimed,
    /// The request expired; the reward was refunded to the requester.
    RequestExpired,
}

impl std::fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestCreated => write!(f, "REQUEST_CREATED"),
            Self::RequestSuperseded => write!(f, "REQUEST_SUPERSEDED"),
            Self::RewardClaimed => write!(f, "REWARD_CLAIMED"),
            Self::RequestExpired => write!(f, "REQUEST_EXPIRED"),
        }
    }
}

/// A receipt proving that a registry action occurred.
///
/// The payload is the canonical JSON of the action body; `payload_hash`
/// is its SHA-256 digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique, issuance-ordered receipt identifier.
    pub id: ReceiptId,
    /// What kind of action this receipt records.
    pub receipt_type: ReceiptType,
    /// The requester whose entry the action touched.
    pub requester: AccountId,
    /// The counterparty paid by the action, if any (the claimant on a
    /// claim; absent on creation and refund).
    pub counterparty: Option<AccountId>,
    /// The escrowed value the action moved or locked.
    pub reward: Decimal,
    /// The clock reading observed by the operation.
    pub height: BlockHeight,
    /// Canonical JSON payload of the action body.
    pub payload: Vec<u8>,
    /// SHA-256 hash of the payload.
    pub payload_hash: [u8; 32],
    /// When this receipt was issued.
    pub issued_at: DateTime<Utc>,
}

/// Canonical body serialized into [`Receipt::payload`].
#[derive(Serialize)]
struct ReceiptBody<'a> {
    receipt_type: &'a ReceiptType,
    requester: &'a AccountId,
    counterparty: &'a Option<AccountId>,
    reward: &'a Decimal,
    height: &'a BlockHeight,
}

impl Receipt {
    /// Issue a receipt for a registry action.
    ///
    /// # Errors
    /// Returns a serialization error if the payload cannot be encoded.
    pub fn issue(
        receipt_type: ReceiptType,
        requester: AccountId,
        counterparty: Option<AccountId>,
        reward: Decimal,
        height: BlockHeight,
    ) -> Result<Self> {
        let payload = serde_json::to_vec(&ReceiptBody {
            receipt_type: &receipt_type,
            requester: &requester,
            counterparty: &counterparty,
            reward: &reward,
            height: &height,
        })?;
        let payload_hash: [u8; 32] = Sha256::digest(&payload).into();
        Ok(Self {
            id: ReceiptId::new(),
            receipt_type,
            requester,
            counterparty,
            reward,
            height,
            payload,
            payload_hash,
            issued_at: Utc::now(),
        })
    }
}
