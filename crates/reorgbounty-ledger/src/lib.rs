//! # reorgbounty-ledger
//!
//! The value-transfer collaborator the registry operates against.
//!
//! ## Architecture
//!
//! 1. **[`ValueLedger`]**: the trait seam — deposit, fallible transfer,
//!    balance lookup. The registry is generic over it so deployments can
//!    swap in a chain-backed ledger.
//! 2. **[`AccountBook`]**: in-memory implementation with per-account
//!    balances. Transfers fail on non-positive amounts and insufficient
//!    balance; nothing moves on failure.
//! 3. **[`SupplyLedger`]**: conservation tracker — total deposits minus
//!    total withdrawals must always equal the sum of account balances.

pub mod book;
pub mod conservation;

pub use book::{AccountBook, ValueLedger};
pub use conservation::SupplyLedger;

#[cfg(any(test, feature = "test-helpers"))]
pub use book::RejectingLedger;
