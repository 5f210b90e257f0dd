//! The request registry: creation, custody, and resolution.
//!
//! The registry owns the map of open requests and a custody account on the
//! value ledger. Custody conservation invariant, enforced on every path:
//!
//! ```text
//! balance(custody) == Σ reward over open requests
//! ```
//!
//! Resolution finalizes registry state before invoking the outbound
//! transfer; transfer failure restores the entry unchanged.

use std::collections::{HashMap, VecDeque};

use reorgbounty_types::{
    AccountId, BlockHeight, ExecuteBoundary, OverwritePolicy, Receipt, ReceiptType, RegistryConfig,
    RegistryError, ReorgProof, Request, Result, constants,
};
use reorgbounty_ledger::ValueLedger;
use rust_decimal::Decimal;

use crate::clock::ReferenceClock;
use crate::verify::ProofVerifier;

/// The Request Registry.
///
/// One open [`Request`] per requester identity. All operations run to
/// completion or fail with no state change (`&mut` access serializes
/// callers; no operation suspends).
pub struct RequestRegistry {
    /// Open requests, keyed by requester. Resolved entries are removed,
    /// freeing the identity for a new request.
    open: HashMap<AccountId, Request>,
    /// The ledger account escrowed rewards are held in.
    custody: AccountId,
    /// Policy configuration (boundary, overwrite, bounds ordering).
    config: RegistryConfig,
    /// Bounded append-only audit trail (oldest receipts evicted at cap).
    receipts: VecDeque<Receipt>,
}

impl RequestRegistry {
    /// Create a registry holding escrow in the given custody account.
    #[must_use]
    pub fn new(custody: AccountId, config: RegistryConfig) -> Self {
        Self {
            open: HashMap::new(),
            custody,
            config,
            receipts: VecDeque::new(),
        }
    }

    /// Create a request and escrow `reward` from the requester.
    ///
    /// The clock is read exactly once, at the start of the call. The
    /// boundary check, the ordered-bounds check (if enabled), and the
    /// overwrite policy all run before any value moves; a failure on any
    /// path leaves the ledger and the registry unchanged.
    ///
    /// # Errors
    /// - `ExecuteBlockInFuture` if `execute_block` violates the boundary policy
    /// - `UnorderedBounds` if enabled and `expiry_block < execute_block`
    /// - `RequestAlreadyOpen` under the reject overwrite policy
    /// - `TransferRejected` if the requester refuses the prior refund
    /// - `InvalidAmount` / `InsufficientFunds` if the deposit cannot be funded
    pub fn request<L: ValueLedger, C: ReferenceClock>(
        &mut self,
        ledger: &mut L,
        clock: &C,
        requester: AccountId,
        execute_block: BlockHeight,
        expiry_block: BlockHeight,
        reward: Decimal,
    ) -> Result<()> {
        let now = clock.height();

        let in_bounds = match self.config.boundary {
            ExecuteBoundary::NowOrPast => execute_block <= now,
            ExecuteBoundary::StrictlyPast => execute_block < now,
        };
        if !in_bounds {
            return Err(RegistryError::ExecuteBlockInFuture { execute_block, now });
        }
        if self.config.require_ordered_bounds && expiry_block < execute_block {
            return Err(RegistryError::UnorderedBounds {
                execute_block,
                expiry_block,
            });
        }

        let prior = match (self.open.get(&requester), self.config.overwrite) {
            (Some(_), OverwritePolicy::Reject) => {
                return Err(RegistryError::RequestAlreadyOpen(requester));
            }
            (prior, _) => prior.cloned(),
        };

        // Receipts are issued before any value moves so a serialization
        // failure cannot strand a committed transfer.
        let superseded_receipt = prior
            .as_ref()
            .map(|p| {
                Receipt::issue(ReceiptType::RequestSuperseded, requester, None, p.reward, now)
            })
            .transpose()?;
        let created_receipt =
            Receipt::issue(ReceiptType::RequestCreated, requester, None, reward, now)?;

        // Refund the superseded reward in full before accepting the new
        // deposit. If the requester refuses the refund, nothing has moved
        // yet and the call aborts cleanly with the prior entry intact.
        if let Some(prior) = &prior {
            ledger.transfer(self.custody, requester, prior.reward)?;
        }

        // Escrow the new reward. On failure, re-take the refund just paid:
        // the requester holds at least `prior.reward`, and custody is
        // registry-controlled, so the restore cannot fail on funds.
        if let Err(deposit_err) = ledger.transfer(requester, self.custody, reward) {
            if let Some(prior) = &prior {
                if ledger.transfer(requester, self.custody, prior.reward).is_err() {
                    tracing::warn!(
                        requester = %requester,
                        "refund restore failed after deposit failure; custody out of balance"
                    );
                    return Err(RegistryError::CustodyInvariantViolation {
                        reason: format!(
                            "unable to restore refund of {} from {requester} \
                             after deposit failure",
                            prior.reward
                        ),
                    });
                }
            }
            return Err(deposit_err);
        }

        self.open.insert(
            requester,
            Request::open(requester, execute_block, expiry_block, reward),
        );
        if let Some(receipt) = superseded_receipt {
            self.push_receipt(receipt);
        }
        self.push_receipt(created_receipt);
        tracing::info!(
            requester = %requester,
            execute_block = %execute_block,
            expiry_block = %expiry_block,
            reward = %reward,
            "request created"
        );
        Ok(())
    }

    /// Resolve a request in the claimant's favor.
    ///
    /// The clock reading at call time must not have passed the expiry
    /// block, and `proof` must verify against the open entry. The entry is
    /// removed before the payout; a failed payout restores it.
    ///
    /// Returns the terminal record with `claimant` set.
    ///
    /// # Errors
    /// - `RequestNotFound` if no open request exists for `requester`
    /// - `RequestExpired` if the clock has passed the expiry block
    /// - 4xx proof errors from the verifier
    /// - `TransferRejected` / `InsufficientFunds` if the payout fails
    pub fn claim<L: ValueLedger, C: ReferenceClock, V: ProofVerifier>(
        &mut self,
        ledger: &mut L,
        clock: &C,
        verifier: &V,
        requester: AccountId,
        claimant: AccountId,
        proof: &ReorgProof,
    ) -> Result<Request> {
        let now = clock.height();
        let entry = self
            .open
            .get(&requester)
            .ok_or(RegistryError::RequestNotFound(requester))?;

        if !entry.claimable_at(now) {
            return Err(RegistryError::RequestExpired {
                expiry_block: entry.expiry_block,
                now,
            });
        }
        verifier.verify(proof, entry, claimant)?;
        let receipt = Receipt::issue(
            ReceiptType::RewardClaimed,
            requester,
            Some(claimant),
            entry.reward,
            now,
        )?;

        // Finalize state before paying out, then roll back if the
        // transfer fails.
        let mut resolved = self
            .open
            .remove(&requester)
            .ok_or(RegistryError::RequestNotFound(requester))?;
        if let Err(err) = ledger.transfer(self.custody, claimant, resolved.reward) {
            self.open.insert(requester, resolved);
            return Err(err);
        }
        resolved.claimant = Some(claimant);

        self.push_receipt(receipt);
        tracing::info!(
            requester = %requester,
            claimant = %claimant,
            reward = %resolved.reward,
            "reward claimed"
        );
        Ok(resolved)
    }

    /// Refund an expired request to its requester.
    ///
    /// Only valid strictly after the expiry block. The entry is removed
    /// before the refund; a failed refund restores it.
    ///
    /// Returns the terminal record.
    ///
    /// # Errors
    /// - `RequestNotFound` if no open request exists for `requester`
    /// - `NotYetExpired` if the clock is at or before the expiry block
    /// - `TransferRejected` / `InsufficientFunds` if the refund fails
    pub fn expire<L: ValueLedger, C: ReferenceClock>(
        &mut self,
        ledger: &mut L,
        clock: &C,
        requester: AccountId,
    ) -> Result<Request> {
        let now = clock.height();
        let entry = self
            .open
            .get(&requester)
            .ok_or(RegistryError::RequestNotFound(requester))?;

        if !entry.expired_at(now) {
            return Err(RegistryError::NotYetExpired {
                expiry_block: entry.expiry_block,
                now,
            });
        }
        let receipt = Receipt::issue(ReceiptType::RequestExpired, requester, None, entry.reward, now)?;

        let resolved = self
            .open
            .remove(&requester)
            .ok_or(RegistryError::RequestNotFound(requester))?;
        if let Err(err) = ledger.transfer(self.custody, requester, resolved.reward) {
            self.open.insert(requester, resolved);
            return Err(err);
        }

        self.push_receipt(receipt);
        tracing::info!(
            requester = %requester,
            reward = %resolved.reward,
            "expired request refunded"
        );
        Ok(resolved)
    }

    /// The current record for an identity: the open request, or the
    /// zero-valued default. Total mapping — never fails, no side effects.
    #[must_use]
    pub fn requests(&self, identity: AccountId) -> Request {
        self.open.get(&identity).cloned().unwrap_or_default()
    }

    /// Number of open requests.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Sum of rewards over all open requests.
    #[must_use]
    pub fn open_rewards_total(&self) -> Decimal {
        self.open.values().map(|r| r.reward).sum()
    }

    /// The custody account escrow is held in.
    #[must_use]
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    /// Balance currently held in custody on the given ledger.
    #[must_use]
    pub fn custodied<L: ValueLedger>(&self, ledger: &L) -> Decimal {
        ledger.balance(self.custody)
    }

    /// Check the custody conservation invariant against the ledger.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] if the custody
    /// balance does not equal the sum of open rewards.
    pub fn verify_custody<L: ValueLedger>(&self, ledger: &L) -> Result<()> {
        let held = self.custodied(ledger);
        let owed = self.open_rewards_total();
        if held != owed {
            tracing::warn!(%held, %owed, "custody invariant violated");
            return Err(RegistryError::CustodyInvariantViolation {
                reason: format!("custody holds {held}, open requests total {owed}"),
            });
        }
        Ok(())
    }

    /// The audit trail, oldest first.
    pub fn receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.receipts.iter()
    }

    fn push_receipt(&mut self, receipt: Receipt) {
        if self.receipts.len() >= constants::RECEIPT_LOG_CAP {
            self.receipts.pop_front();
        }
        self.receipts.push_back(receipt);
    }
}

#[cfg(test)]
mod tests {
    use reorgbounty_ledger::{AccountBook, RejectingLedger};

    use super::*;
    use crate::clock::ManualClock;

    const CUSTODY: AccountId = AccountId([0xee; 32]);

    fn acct(tag: u8) -> AccountId {
        AccountId([tag; 32])
    }

    fn setup() -> (RequestRegistry, AccountBook, ManualClock) {
        let registry = RequestRegistry::new(CUSTODY, RegistryConfig::default());
        let mut book = AccountBook::new();
        book.deposit(acct(1), Decimal::new(100, 0));
        let clock = ManualClock::new(BlockHeight(100));
        (registry, book, clock)
    }

    #[test]
    fn request_escrows_and_stores() {
        let (mut registry, mut book, clock) = setup();
        // At height H: request(H-10, H-5) with reward 1.
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();

        let stored = registry.requests(acct(1));
        assert_eq!(stored.claimant, None);
        assert_eq!(stored.claimant_or_zero(), AccountId::ZERO);
        assert_eq!(stored.execute_block, BlockHeight(90));
        assert_eq!(stored.expiry_block, BlockHeight(95));
        assert_eq!(stored.reward, Decimal::ONE);

        assert_eq!(registry.custodied(&book), Decimal::ONE);
        assert_eq!(book.balance(acct(1)), Decimal::new(99, 0));
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn future_execute_block_rejected() {
        let (mut registry, mut book, clock) = setup();
        // request(H+1, H) at height H.
        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(101),
                BlockHeight(100),
                Decimal::ONE,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::ExecuteBlockInFuture { .. }));

        // No funds moved, no entry created.
        assert_eq!(book.balance(acct(1)), Decimal::new(100, 0));
        assert_eq!(registry.custodied(&book), Decimal::ZERO);
        assert!(registry.requests(acct(1)).is_vacant());
    }

    #[test]
    fn boundary_now_or_past_accepts_current_height() {
        let (mut registry, mut book, clock) = setup();
        // request(H, H-1) at height H: accepted under NowOrPast.
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(100),
                BlockHeight(99),
                Decimal::ONE,
            )
            .unwrap();
        assert_eq!(registry.requests(acct(1)).execute_block, BlockHeight(100));
    }

    #[test]
    fn boundary_strictly_past_rejects_current_height() {
        let mut registry = RequestRegistry::new(
            CUSTODY,
            RegistryConfig {
                boundary: ExecuteBoundary::StrictlyPast,
                ..RegistryConfig::default()
            },
        );
        let mut book = AccountBook::new();
        book.deposit(acct(1), Decimal::new(100, 0));
        let clock = ManualClock::new(BlockHeight(100));

        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(100),
                BlockHeight(99),
                Decimal::ONE,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::ExecuteBlockInFuture { .. }));

        // One block back passes.
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(99),
                BlockHeight(105),
                Decimal::ONE,
            )
            .unwrap();
    }

    #[test]
    fn ordered_bounds_enforced_when_enabled() {
        let mut registry = RequestRegistry::new(
            CUSTODY,
            RegistryConfig {
                require_ordered_bounds: true,
                ..RegistryConfig::default()
            },
        );
        let mut book = AccountBook::new();
        book.deposit(acct(1), Decimal::new(100, 0));
        let clock = ManualClock::new(BlockHeight(100));

        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(100),
                BlockHeight(99),
                Decimal::ONE,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnorderedBounds { .. }));
        assert_eq!(book.balance(acct(1)), Decimal::new(100, 0));
    }

    #[test]
    fn insufficient_funds_aborts_cleanly() {
        let (mut registry, mut book, clock) = setup();
        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(1000, 0),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::InsufficientFunds { .. }));
        assert!(registry.requests(acct(1)).is_vacant());
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn overwrite_refunds_prior_reward() {
        let (mut registry, mut book, clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(10, 0),
            )
            .unwrap();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(92),
                BlockHeight(97),
                Decimal::new(4, 0),
            )
            .unwrap();

        // Prior 10 refunded, new 4 escrowed: 100 - 10 + 10 - 4 = 96.
        assert_eq!(book.balance(acct(1)), Decimal::new(96, 0));
        assert_eq!(registry.custodied(&book), Decimal::new(4, 0));
        let stored = registry.requests(acct(1));
        assert_eq!(stored.execute_block, BlockHeight(92));
        assert_eq!(stored.reward, Decimal::new(4, 0));
        assert_eq!(registry.open_count(), 1);
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn overwrite_rejected_under_reject_policy() {
        let mut registry = RequestRegistry::new(
            CUSTODY,
            RegistryConfig {
                overwrite: OverwritePolicy::Reject,
                ..RegistryConfig::default()
            },
        );
        let mut book = AccountBook::new();
        book.deposit(acct(1), Decimal::new(100, 0));
        let clock = ManualClock::new(BlockHeight(100));

        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(91),
                BlockHeight(96),
                Decimal::ONE,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::RequestAlreadyOpen(_)));

        // Original entry untouched.
        let stored = registry.requests(acct(1));
        assert_eq!(stored.execute_block, BlockHeight(90));
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn overwrite_refund_failure_aborts_before_any_value_moves() {
        let mut registry = RequestRegistry::new(CUSTODY, RegistryConfig::default());
        let mut ledger = RejectingLedger::new();
        ledger.deposit(acct(1), Decimal::new(100, 0));
        let clock = ManualClock::new(BlockHeight(100));

        registry
            .request(
                &mut ledger,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(10, 0),
            )
            .unwrap();

        // The requester now refuses inbound transfers: the refund of the
        // prior reward fails before the new deposit is attempted, so the
        // call aborts with nothing moved.
        ledger.block(acct(1));
        let err = registry
            .request(
                &mut ledger,
                &clock,
                acct(1),
                BlockHeight(92),
                BlockHeight(97),
                Decimal::new(4, 0),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::TransferRejected { .. }));

        // Prior entry intact, custody still covers exactly the open reward.
        let stored = registry.requests(acct(1));
        assert_eq!(stored.execute_block, BlockHeight(90));
        assert_eq!(stored.reward, Decimal::new(10, 0));
        assert_eq!(ledger.balance(acct(1)), Decimal::new(90, 0));
        assert_eq!(registry.custodied(&ledger), Decimal::new(10, 0));
        assert_eq!(registry.open_rewards_total(), Decimal::new(10, 0));
        registry.verify_custody(&ledger).unwrap();
    }

    #[test]
    fn overwrite_deposit_failure_restores_refund() {
        let (mut registry, mut book, clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(10, 0),
            )
            .unwrap();

        // Refund of 10 succeeds, but the 200 deposit overdraws the
        // requester: the refund is re-taken and the prior entry stands.
        let err = registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(92),
                BlockHeight(97),
                Decimal::new(200, 0),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::InsufficientFunds { .. }));

        let stored = registry.requests(acct(1));
        assert_eq!(stored.execute_block, BlockHeight(90));
        assert_eq!(stored.reward, Decimal::new(10, 0));
        assert_eq!(book.balance(acct(1)), Decimal::new(90, 0));
        assert_eq!(registry.custodied(&book), Decimal::new(10, 0));
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn first_deposit_failure_leaves_requester_whole() {
        let mut registry = RequestRegistry::new(CUSTODY, RegistryConfig::default());
        let mut ledger = RejectingLedger::new();
        ledger.deposit(acct(2), Decimal::new(100, 0));
        ledger.block(CUSTODY);
        let clock = ManualClock::new(BlockHeight(100));

        let err = registry
            .request(
                &mut ledger,
                &clock,
                acct(2),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(10, 0),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::TransferRejected { .. }));
        assert_eq!(ledger.balance(acct(2)), Decimal::new(100, 0));
        assert!(registry.requests(acct(2)).is_vacant());
    }

    #[test]
    fn query_is_idempotent_and_total() {
        let (mut registry, mut book, clock) = setup();
        assert_eq!(registry.requests(acct(7)), registry.requests(acct(7)));
        assert!(registry.requests(acct(7)).is_vacant());

        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        assert_eq!(registry.requests(acct(1)), registry.requests(acct(1)));
    }

    #[test]
    fn expire_refunds_after_expiry() {
        let (mut registry, mut book, mut clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(105),
                Decimal::new(5, 0),
            )
            .unwrap();

        // At the expiry block itself: too early.
        clock.advance(5);
        let err = registry.expire(&mut book, &clock, acct(1)).unwrap_err();
        assert!(matches!(err, RegistryError::NotYetExpired { .. }));

        // One past expiry: refund.
        clock.advance(1);
        let resolved = registry.expire(&mut book, &clock, acct(1)).unwrap();
        assert_eq!(resolved.reward, Decimal::new(5, 0));
        assert_eq!(resolved.claimant, None);
        assert_eq!(book.balance(acct(1)), Decimal::new(100, 0));
        assert_eq!(registry.custodied(&book), Decimal::ZERO);
        assert!(registry.requests(acct(1)).is_vacant());
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn expire_missing_request_fails() {
        let (mut registry, mut book, clock) = setup();
        let err = registry.expire(&mut book, &clock, acct(3)).unwrap_err();
        assert!(matches!(err, RegistryError::RequestNotFound(_)));
    }

    #[test]
    fn double_expire_fails() {
        let (mut registry, mut book, mut clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        clock.advance(1);
        registry.expire(&mut book, &clock, acct(1)).unwrap();
        let err = registry.expire(&mut book, &clock, acct(1)).unwrap_err();
        assert!(matches!(err, RegistryError::RequestNotFound(_)));
    }

    #[test]
    fn expire_transfer_failure_restores_entry() {
        let mut registry = RequestRegistry::new(CUSTODY, RegistryConfig::default());
        let mut ledger = RejectingLedger::new();
        ledger.deposit(acct(1), Decimal::new(100, 0));
        let mut clock = ManualClock::new(BlockHeight(100));

        registry
            .request(
                &mut ledger,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::new(10, 0),
            )
            .unwrap();
        clock.advance(1);

        ledger.block(acct(1));
        let err = registry.expire(&mut ledger, &clock, acct(1)).unwrap_err();
        assert!(matches!(err, RegistryError::TransferRejected { .. }));

        // Entry restored, custody still holds the reward.
        assert!(!registry.requests(acct(1)).is_vacant());
        registry.verify_custody(&ledger).unwrap();

        ledger.unblock(acct(1));
        registry.expire(&mut ledger, &clock, acct(1)).unwrap();
        assert_eq!(ledger.balance(acct(1)), Decimal::new(100, 0));
    }

    #[test]
    fn requester_can_reuse_identity_after_resolution() {
        let (mut registry, mut book, mut clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        clock.advance(1);
        registry.expire(&mut book, &clock, acct(1)).unwrap();

        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(95),
                BlockHeight(110),
                Decimal::new(2, 0),
            )
            .unwrap();
        assert_eq!(registry.requests(acct(1)).reward, Decimal::new(2, 0));
        registry.verify_custody(&book).unwrap();
    }

    #[test]
    fn receipts_record_lifecycle() {
        let (mut registry, mut book, mut clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        clock.advance(1);
        registry.expire(&mut book, &clock, acct(1)).unwrap();

        let kinds: Vec<_> = registry.receipts().map(|r| r.receipt_type).collect();
        assert_eq!(
            kinds,
            vec![ReceiptType::RequestCreated, ReceiptType::RequestExpired]
        );
    }

    #[test]
    fn custody_violation_detected() {
        let (mut registry, mut book, clock) = setup();
        registry
            .request(
                &mut book,
                &clock,
                acct(1),
                BlockHeight(90),
                BlockHeight(95),
                Decimal::ONE,
            )
            .unwrap();
        // Drain custody behind the registry's back.
        book.transfer(CUSTODY, acct(9), Decimal::ONE).unwrap();
        let err = registry.verify_custody(&book).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::CustodyInvariantViolation { .. }
        ));
    }
}
