//! Error types for the ReorgBounty registry.
//!
//! All errors use the `RB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors (temporal bounds at creation)
//! - 2xx: State errors (wrong lifecycle state)
//! - 3xx: Transfer errors (value movement failed)
//! - 4xx: Proof errors (attestation rejected)
//! - 8xx: Safety errors (invariant violations)
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, BlockHeight};

/// Central error enum for all ReorgBounty operations.
///
/// Every rejected precondition maps to a distinct variant so callers can
/// distinguish, e.g., "too early to expire" from "no such request".
#[derive(Debug, Error)]
pub enum RegistryError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The execute block violates the past-boundary policy: it lies in the
    /// future relative to the clock reading taken at the start of the call.
    #[error("RB_ERR_100: execute block {execute_block} violates past-boundary policy at {now}")]
    ExecuteBlockInFuture {
        execute_block: BlockHeight,
        now: BlockHeight,
    },

    /// Expiry precedes the execute block (only with `require_ordered_bounds`).
    #[error("RB_ERR_101: expiry {expiry_block} precedes execute block {execute_block}")]
    UnorderedBounds {
        execute_block: BlockHeight,
        expiry_block: BlockHeight,
    },

    // =================================================================
    // State Errors (2xx)
    // =================================================================
    /// No open request exists for this requester.
    #[error("RB_ERR_200: no open request for {0}")]
    RequestNotFound(AccountId),

    /// A request is already open for this requester (reject overwrite policy).
    #[error("RB_ERR_201: request already open for {0}")]
    RequestAlreadyOpen(AccountId),

    /// Expiry attempted at or before the expiry block.
    #[error("RB_ERR_202: not yet expired: expiry {expiry_block}, clock at {now}")]
    NotYetExpired {
        expiry_block: BlockHeight,
        now: BlockHeight,
    },

    /// Claim attempted after the expiry block has passed.
    #[error("RB_ERR_203: request expired: expiry {expiry_block}, clock at {now}")]
    RequestExpired {
        expiry_block: BlockHeight,
        now: BlockHeight,
    },

    // =================================================================
    // Transfer Errors (3xx)
    // =================================================================
    /// Transfer amount must be strictly positive.
    #[error("RB_ERR_300: invalid transfer amount: {0}")]
    InvalidAmount(Decimal),

    /// Not enough balance to fund the transfer.
    #[error("RB_ERR_301: insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// The recipient rejected the outbound transfer.
    #[error("RB_ERR_302: transfer to {to} rejected: {reason}")]
    TransferRejected { to: AccountId, reason: String },

    // =================================================================
    // Proof Errors (4xx)
    // =================================================================
    /// The proof artifact is structurally invalid or its signature failed.
    #[error("RB_ERR_400: invalid proof: {reason}")]
    ProofInvalid { reason: String },

    /// The attestor key is not in the trusted set.
    #[error("RB_ERR_401: untrusted attestor: {attestor_hex}")]
    UntrustedAttestor { attestor_hex: String },

    /// The proof does not bind to the request being claimed.
    #[error("RB_ERR_402: proof binding mismatch: {reason}")]
    ProofBindingMismatch { reason: String },

    // =================================================================
    // Safety Errors (8xx)
    // =================================================================
    /// Custody conservation invariant violated — critical safety alert.
    #[error("RB_ERR_800: custody invariant violation: {reason}")]
    CustodyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("RB_ERR_900: internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("RB_ERR_901: serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RegistryError>;

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
