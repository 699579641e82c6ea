//! # Quorum Verification
//!
//! Checks that a batch of signatures over a report digest forms a quorum of
//! more than `f` distinct, authorized signers.
//!
//! Signatures must recover to strictly ascending addresses. That single
//! ordering rule rules out counting one signer twice, so no separate
//! "already seen" set is kept. Any bad signature rejects the whole batch.

use super::config_store::ConfigStore;
use super::digest::{report_digest, ReportBinding, ReportContext};
use super::entities::{Address, Hash, MerkleRoot, Signature, ZERO_ADDRESS};
use super::errors::{RmnError, RmnResult};
use crate::ports::outbound::SignatureRecovery;

/// Stateless verifier over one config snapshot.
pub struct QuorumVerifier<'a, R: SignatureRecovery + ?Sized> {
    store: &'a ConfigStore,
    recovery: &'a R,
}

impl<'a, R: SignatureRecovery + ?Sized> QuorumVerifier<'a, R> {
    /// Create a verifier reading `store` and recovering with `recovery`.
    pub fn new(store: &'a ConfigStore, recovery: &'a R) -> Self {
        Self { store, recovery }
    }

    /// Verify `signatures` over the report for `merkle_roots`, bound to
    /// `binding` and `offramp_address`. Returns the verified digest.
    pub fn verify(
        &self,
        binding: &ReportBinding,
        offramp_address: Address,
        merkle_roots: &[MerkleRoot],
        signatures: &[Signature],
    ) -> RmnResult<Hash> {
        if !self.store.is_set() {
            return Err(RmnError::ConfigNotSet);
        }
        // Cheap rejection before any hashing or recovery
        self.check_threshold(signatures.len())?;

        let context = ReportContext {
            binding: *binding,
            offramp_address,
            config_digest: self.store.config().rmn_home_contract_config_digest,
        };
        let digest = report_digest(&context, merkle_roots);
        self.verify_signers(&digest, signatures)?;
        Ok(digest)
    }

    /// Require strictly more than `f` signatures.
    pub fn check_threshold(&self, signature_count: usize) -> RmnResult<()> {
        if (signature_count as u128) <= self.store.f() as u128 {
            return Err(RmnError::ThresholdNotMet);
        }
        Ok(())
    }

    /// Recover each signer in order and check ordering and membership.
    pub fn verify_signers(&self, digest: &Hash, signatures: &[Signature]) -> RmnResult<()> {
        let mut previous = ZERO_ADDRESS;
        for signature in signatures {
            let signer = match self.recovery.recover(digest, signature) {
                Ok(address) if address != ZERO_ADDRESS => address,
                _ => return Err(RmnError::InvalidSignature),
            };
            if signer <= previous {
                return Err(RmnError::OutOfOrderSignatures);
            }
            if !self.store.is_signer(&signer) {
                return Err(RmnError::UnexpectedSigner);
            }
            previous = signer;
        }
        Ok(())
    }
}
