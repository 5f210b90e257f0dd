//! System-wide constants for the ReorgBounty registry.

/// Domain separator for reorg-proof signing payloads.
pub const PROOF_DOMAIN: &[u8] = b"reorgbounty:proof:v1:";

/// Maximum receipts retained in the registry's audit log before the
/// oldest are evicted.
pub const RECEIPT_LOG_CAP: usize = 65_536;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "ReorgBounty";
