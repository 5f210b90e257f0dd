//! The reorg proof artifact submitted with a claim.
//!
//! A [`ReorgProof`] is an ed25519 attestation by a trusted attestor that a
//! chain reorganization reached the request's execute block. The signature
//! covers a canonical domain-prefixed payload binding the proof to one
//! specific request and claimant, so an attestation for one bounty cannot
//! be replayed against another.

use serde::{Deserialize, Serialize};

use crate::{AccountId, BlockHeight, constants};

/// Attestation that the requested reorg occurred, signed by a trusted
/// attestor key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorgProof {
    /// The requester whose bounty this proof resolves.
    pub requester: AccountId,
    /// The claimant the attestor observed performing the reorg.
    pub claimant: AccountId,
    /// Must equal the request's execute block.
    pub execute_block: BlockHeight,
    /// Must equal the request's expiry block.
    pub expiry_block: BlockHeight,
    /// Hash of the block that replaced the canonical chain at
    /// `execute_block`.
    pub reorged_block_hash: [u8; 32],
    /// The attestor's ed25519 public key (must be in the verifier's
    /// trusted set).
    pub attestor: [u8; 32],
    /// Ed25519 signature over [`ReorgProof::signing_payload`].
    pub signature: Vec<u8>,
}

impl ReorgProof {
    /// Canonical signing payload for ed25519 verification.
    ///
    /// Format: `PROOF_DOMAIN || requester || claimant || execute_block ||
    /// expiry_block || reorged_block_hash`
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(160);
        payload.extend_from_slice(constants::PROOF_DOMAIN);
        payload.extend_from_slice(self.requester.as_bytes());
        payload.extend_from_slice(self.claimant.as_bytes());
        payload.extend_from_slice(&self.execute_block.0.to_le_bytes());
        payload.extend_from_slice(&self.expiry_block.0.to_le_bytes());
        payload.extend_from_slice(&self.reorged_block_hash);
        payload
    }
}

/// Attestor-signed proof constructor for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl ReorgProof {
    /// Build a proof signed by `attestor_key` binding the given request
    /// bounds and claimant.
    pub fn attested(
        attestor_key: &ed25519_dalek::SigningKey,
        requester: AccountId,
        claimant: AccountId,
        execute_block: BlockHeight,
        expiry_block: BlockHeight,
        reorged_block_hash: [u8; 32],
    ) -> Self {
        use ed25519_dalek::Signer;

        let mut proof = Self {
            requester,
            claimant,
            execute_block,
            expiry_block,
            reorged_block_hash,
            attestor: attestor_key.verifying_key().to_bytes(),
            signature: Vec::new(),
        };
        proof.signature = attestor_key
            .sign(&proof.signing_payload())
            .to_bytes()
            .to_vec();
        proof
    }
}
