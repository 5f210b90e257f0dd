//! Policy configuration for the request registry.
//!
//! Two behaviors are deployment policy rather than hard requirements: the
//! past-boundary check on `execute_block` and the handling of a second
//! `request` from an identity that already has one open. Both are explicit
//! config so the chosen policy is visible and auditable.

use serde::{Deserialize, Serialize};

/// Past-boundary policy for `execute_block` at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecuteBoundary {
    /// Accept `execute_block <= now`: the target block may be the block
    /// the clock currently reads.
    #[default]
    NowOrPast,
    /// Accept only `execute_block < now`.
    StrictlyPast,
}

/// Handling of a `request` call from an identity with an open request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Refund the prior reward in full, then escrow the new deposit and
    /// replace the entry — atomically.
    #[default]
    RefundAndReplace,
    /// Reject the new request with a state error.
    Reject,
}

/// Registry policy configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Past-boundary policy for `execute_block`.
    pub boundary: ExecuteBoundary,
    /// Repeated-request handling.
    pub overwrite: OverwritePolicy,
    /// Reject requests whose expiry precedes their execute block.
    /// Off by default: `request(H, H-1)` is valid under `NowOrPast`.
    pub require_ordered_bounds: bool,
}

impl RegistryConfig {
    /// Strictest policy set: strictly-past boundary, reject overwrites,
    /// ordered bounds required.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            boundary: ExecuteBoundary::StrictlyPast,
            overwrite: OverwritePolicy::Reject,
            require_ordered_bounds: true,
        }
    }
}
