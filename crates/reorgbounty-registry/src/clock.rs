//! The reference clock: the external height counter temporal bounds are
//! validated against.
//!
//! The registry reads the clock exactly once at the start of each operation
//! and never caches the value across operations. The counter is
//! monotonically non-decreasing; [`ManualClock`] can only advance.

use reorgbounty_types::BlockHeight;

/// Read-on-demand access to the current reference height.
pub trait ReferenceClock {
    /// The current height. Monotonically non-decreasing across calls.
    fn height(&self) -> BlockHeight;
}

/// An advance-only clock for off-chain deployments and tests. Stands in
/// for the block-producing ledger's height counter.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    height: BlockHeight,
}

impl ManualClock {
    /// Create a clock at the given starting height.
    #[must_use]
    pub fn new(start: BlockHeight) -> Self {
        Self { height: start }
    }

    /// Advance the clock by `blocks`.
    pub fn advance(&mut self, blocks: u64) {
        self.height = self.height.ahead(blocks);
    }
}

impl ReferenceClock for ManualClock {
    fn height(&self) -> BlockHeight {
        self.height
    }
}
