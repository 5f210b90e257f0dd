//! The request record: one escrowed reorg bounty per requester.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌───────┐  claim (proof, clock ≤ expiry)   ┌────────────────────┐
//!   │ OPEN  ├─────────────────────────────────▶│ paid to claimant   │
//!   └───┬───┘                                  └────────────────────┘
//!       │ expire (clock > expiry)
//!       ▼
//!   ┌────────────────────────┐
//!   │ refunded to requester  │
//!   └────────────────────────┘
//! ```
//!
//! Resolved entries are cleared from the registry, freeing the requester
//! identity to open a new request. The query surface is a total mapping:
//! absent identities yield the zero-valued default record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, BlockHeight};

/// An escrowed request that a chain reorganization reach `execute_block`.
///
/// At most one open `Request` exists per requester. `claimant` is `None`
/// while the request is open; a successful claim sets it and the record
/// becomes terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The identity that created the request and deposited the reward.
    pub requester: AccountId,
    /// The identity paid on resolution. `None` until a successful claim.
    pub claimant: Option<AccountId>,
    /// Height at/before which the reorg must have occurred. Validated
    /// against the clock reading taken at creation time.
    pub execute_block: BlockHeight,
    /// Height after which the request is no longer claimable and becomes
    /// refundable to the requester.
    pub expiry_block: BlockHeight,
    /// The escrowed value, held by the registry's custody account until
    /// resolution.
    pub reward: Decimal,
}

impl Request {
    /// Open a new request record.
    #[must_use]
    pub fn open(
        requester: AccountId,
        execute_block: BlockHeight,
        expiry_block: BlockHeight,
        reward: Decimal,
    ) -> Self {
        Self {
            requester,
            claimant: None,
            execute_block,
            expiry_block,
            reward,
        }
    }

    /// Whether this is the zero-valued default record the query surface
    /// returns for identities with no open request.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self == &Self::default()
    }

    /// The claimant as the external zero-sentinel convention: `ZERO` while
    /// unresolved.
    #[must_use]
    pub fn claimant_or_zero(&self) -> AccountId {
        self.claimant.unwrap_or(AccountId::ZERO)
    }

    /// Whether the request can still be claimed at `now` (claims are
    /// accepted through the expiry block inclusive).
    #[must_use]
    pub fn claimable_at(&self, now: BlockHeight) -> bool {
        now <= self.expiry_block
    }

    /// Whether the request is refundable at `now` (strictly after expiry).
    #[must_use]
    pub fn expired_at(&self, now: BlockHeight) -> bool {
        now > self.expiry_block
    }
}
