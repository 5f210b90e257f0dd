//! # reorgbounty-registry
//!
//! The **Request Registry**: owns all request records, enforces creation
//! invariants against the reference clock, custodies escrowed rewards, and
//! exposes the resolution operations.
//!
//! ## Architecture
//!
//! 1. **[`ReferenceClock`]**: the moving height counter, read once per
//!    operation and never cached across operations
//! 2. **[`RequestRegistry`]**: the state machine — `request`, `claim`,
//!    `expire`, `requests`
//! 3. **[`ProofVerifier`]** / **[`AttestorVerifier`]**: accepts or rejects
//!    the reorg attestation submitted with a claim
//!
//! ## Request Flow
//!
//! ```text
//! request() → boundary check → escrow reward into custody → entry OPEN
//! claim()   → proof verified → entry cleared → custody pays claimant
//! expire()  → clock > expiry → entry cleared → custody refunds requester
//! ```
//!
//! Every resolution finalizes the registry state **before** invoking the
//! outbound transfer; a failed transfer rolls the entry back unchanged.

pub mod clock;
pub mod registry;
pub mod verify;

pub use clock::{ManualClock, ReferenceClock};
pub use registry::RequestRegistry;
pub use verify::{AttestorVerifier, ProofVerifier};
