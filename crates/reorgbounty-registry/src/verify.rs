//! Proof verification for claims.
//!
//! A claim carries a [`ReorgProof`]: an ed25519 attestation by a trusted
//! attestor that the requested reorg occurred. Verification checks three
//! things, in order:
//!
//! 1. the attestor key is in the trusted set
//! 2. the proof binds to the exact request and claimant being resolved
//! 3. the signature verifies over the canonical payload

use std::collections::HashSet;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use reorgbounty_types::{AccountId, RegistryError, ReorgProof, Request, Result};

/// Accepts or rejects the proof artifact submitted with a claim.
pub trait ProofVerifier {
    /// Verify `proof` against the open `request` and the `claimant`
    /// asking to be paid.
    ///
    /// # Errors
    /// Returns a 4xx proof error describing the first check that failed.
    fn verify(&self, proof: &ReorgProof, request: &Request, claimant: AccountId) -> Result<()>;
}

/// Verifier backed by a set of trusted ed25519 attestor keys.
#[derive(Debug, Clone, Default)]
pub struct AttestorVerifier {
    /// Raw public keys of trusted attestors.
    trusted: HashSet<[u8; 32]>,
}

impl AttestorVerifier {
    /// Create a verifier with an empty trusted set (rejects everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attestor key to the trusted set.
    pub fn trust(&mut self, attestor: [u8; 32]) {
        self.trusted.insert(attestor);
    }

    /// Remove an attestor key from the trusted set.
    pub fn revoke(&mut self, attestor: &[u8; 32]) {
        self.trusted.remove(attestor);
    }

    /// Whether the key is currently trusted.
    #[must_use]
    pub fn is_trusted(&self, attestor: &[u8; 32]) -> bool {
        self.trusted.contains(attestor)
    }
}

impl ProofVerifier for AttestorVerifier {
    fn verify(&self, proof: &ReorgProof, request: &Request, claimant: AccountId) -> Result<()> {
        if !self.trusted.contains(&proof.attestor) {
            return Err(RegistryError::UntrustedAttestor {
                attestor_hex: hex::encode(proof.attestor),
            });
        }

        if proof.requester != request.requester {
            return Err(RegistryError::ProofBindingMismatch {
                reason: format!(
                    "proof attests requester {}, request belongs to {}",
                    proof.requester, request.requester
                ),
            });
        }
        if proof.claimant != claimant {
            return Err(RegistryError::ProofBindingMismatch {
                reason: format!(
                    "proof attests claimant {}, claim made by {claimant}",
                    proof.claimant
                ),
            });
        }
        if proof.execute_block != request.execute_block
            || proof.expiry_block != request.expiry_block
        {
            return Err(RegistryError::ProofBindingMismatch {
                reason: format!(
                    "proof bounds ({}, {}) do not match request bounds ({}, {})",
                    proof.execute_block,
                    proof.expiry_block,
                    request.execute_block,
                    request.expiry_block
                ),
            });
        }

        let key =
            VerifyingKey::from_bytes(&proof.attestor).map_err(|e| RegistryError::ProofInvalid {
                reason: format!("malformed attestor key: {e}"),
            })?;
        let signature =
            Signature::from_slice(&proof.signature).map_err(|e| RegistryError::ProofInvalid {
                reason: format!("malformed signature: {e}"),
            })?;
        key.verify(&proof.signing_payload(), &signature)
            .map_err(|_| RegistryError::ProofInvalid {
                reason: "signature verification failed".into(),
            })
    }
}
