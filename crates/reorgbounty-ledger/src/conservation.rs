//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced after every value movement:
//! ```text
//! Σ(account balances) == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Transfers between accounts (escrow, payout, refund) never change the
//! total. If this invariant ever breaks, funds were created or destroyed
//! somewhere and the system must halt.

use reorgbounty_types::{RegistryError, Result};
use rust_decimal::Decimal;

/// Tracks system-wide supply totals and validates conservation.
#[derive(Debug, Clone, Default)]
pub struct SupplyLedger {
    /// Total deposited into the system since genesis.
    deposits: Decimal,
    /// Total withdrawn out of the system since genesis.
    withdrawals: Decimal,
}

impl SupplyLedger {
    /// Create a new supply tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an inbound deposit.
    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    /// Record an outbound withdrawal.
    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawals += amount;
    }

    /// Expected total supply: deposits - withdrawals.
    #[must_use]
    pub fn expected_supply(&self) -> Decimal {
        self.deposits - self.withdrawals
    }

    /// Total deposits since genesis.
    #[must_use]
    pub fn total_deposits(&self) -> Decimal {
        self.deposits
    }

    /// Total withdrawals since genesis.
    #[must_use]
    pub fn total_withdrawals(&self) -> Decimal {
        self.withdrawals
    }

    /// Verify that the actual supply (sum of all balances) matches the
    /// expected supply.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(RegistryError::CustodyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (deposits={}, withdrawals={})",
                    self.deposits, self.withdrawals,
                ),
            });
        }
        Ok(())
    }
}
