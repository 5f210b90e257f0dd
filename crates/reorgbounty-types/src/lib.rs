//! # reorgbounty-types
//!
//! Shared types, errors, and policy configuration for the **ReorgBounty**
//! escrow registry.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`BlockHeight`], [`ReceiptId`]
//! - **Request model**: [`Request`]
//! - **Proof model**: [`ReorgProof`]
//! - **Receipt model**: [`Receipt`], [`ReceiptType`]
//! - **Policy configuration**: [`RegistryConfig`], [`ExecuteBoundary`], [`OverwritePolicy`]
//! - **Errors**: [`RegistryError`] with `RB_ERR_` prefix codes
//! - **Constants**: domain separators and system-wide limits

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod proof;
pub mod receipt;
pub mod request;

// Re-export all primary types at crate root for ergonomic imports:
//   use reorgbounty_types::{AccountId, Request, RegistryError, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use proof::*;
pub use receipt::*;
pub use request::*;

// Constants are accessed via `reorgbounty_types::constants::FOO`
// (not re-exported to avoid name collisions).
