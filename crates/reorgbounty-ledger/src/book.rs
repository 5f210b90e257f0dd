//! Account balances and the value-transfer seam.
//!
//! All mutations are atomic: either the full operation succeeds or the
//! balances are unchanged.

use std::collections::HashMap;

use reorgbounty_types::{AccountId, RegistryError, Result};
use rust_decimal::Decimal;

use crate::conservation::SupplyLedger;

/// The value-transfer collaborator consumed by the registry.
///
/// Outbound transfers are fallible and must be checked: a failed transfer
/// leaves both accounts unchanged.
pub trait ValueLedger {
    /// Credit `amount` to `account` from outside the system.
    fn deposit(&mut self, account: AccountId, amount: Decimal);

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is not strictly positive
    /// - `InsufficientFunds` if `from` cannot cover `amount`
    /// - `TransferRejected` if the recipient refuses the funds
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()>;

    /// Current balance of `account` (zero if unknown).
    fn balance(&self, account: AccountId) -> Decimal;
}

/// In-memory account book. The source of truth for all balance state in
/// an off-chain deployment.
pub struct AccountBook {
    /// Per-account balances.
    balances: HashMap<AccountId, Decimal>,
    /// Conservation tracker over deposits and withdrawals.
    supply: SupplyLedger,
}

impl AccountBook {
    /// Create a new empty account book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            supply: SupplyLedger::new(),
        }
    }

    /// Withdraw funds out of the system.
    ///
    /// # Errors
    /// Returns `InvalidAmount` or `InsufficientFunds` like [`ValueLedger::transfer`].
    pub fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(RegistryError::InvalidAmount(amount));
        }
        let entry = self.balances.entry(account).or_insert(Decimal::ZERO);
        if *entry < amount {
            return Err(RegistryError::InsufficientFunds {
                needed: amount,
                available: *entry,
            });
        }
        *entry -= amount;
        self.supply.record_withdrawal(amount);
        Ok(())
    }

    /// Sum of all account balances.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Verify that the sum of balances equals deposits minus withdrawals.
    ///
    /// # Errors
    /// Returns [`RegistryError::CustodyInvariantViolation`] on mismatch.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.total_supply())
    }
}

impl ValueLedger for AccountBook {
    fn deposit(&mut self, account: AccountId, amount: Decimal) {
        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
        self.supply.record_deposit(amount);
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(RegistryError::InvalidAmount(amount));
        }
        let from_balance = self.balances.get(&from).copied().unwrap_or(Decimal::ZERO);
        if from_balance < amount {
            return Err(RegistryError::InsufficientFunds {
                needed: amount,
                available: from_balance,
            });
        }
        *self.balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    fn balance(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }
}

impl Default for AccountBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Ledger wrapper whose blocked accounts refuse inbound transfers.
/// Exercises the registry's rollback paths. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
pub struct RejectingLedger {
    inner: AccountBook,
    blocked: std::collections::HashSet<AccountId>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RejectingLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: AccountBook::new(),
            blocked: std::collections::HashSet::new(),
        }
    }

    /// Make `account` refuse all inbound transfers.
    pub fn block(&mut self, account: AccountId) {
        self.blocked.insert(account);
    }

    /// Allow inbound transfers to `account` again.
    pub fn unblock(&mut self, account: AccountId) {
        self.blocked.remove(&account);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Default for RejectingLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl ValueLedger for RejectingLedger {
    fn deposit(&mut self, account: AccountId, amount: Decimal) {
        self.inner.deposit(account, amount);
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        if self.blocked.contains(&to) {
            return Err(RegistryError::TransferRejected {
                to,
                reason: "recipient refuses funds".into(),
            });
        }
        self.inner.transfer(from, to, amount)
    }

    fn balance(&self, account: AccountId) -> Decimal {
        self.inner.balance(account)
    }
}
