//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the RMN remote verifier.
//!
//! `caller` parameters carry the identity of whoever submitted the call; the
//! owner-gated operations compare it with the current owner.

use crate::domain::entities::{
    Address, Config, Hash, MerkleRoot, Signature, Subject, TaggedRoot, VersionedConfig,
};
use crate::domain::errors::RmnResult;

/// Read surface consumed by off-ramps and other lane-operating components.
///
/// Implementations must be thread-safe (`Send + Sync`) and must never expose
/// half-applied state.
pub trait Rmn: Send + Sync {
    /// Verify that `signatures` form a quorum over `merkle_roots` for
    /// `offramp_address`. An `Err` means the commit must be rejected.
    fn verify(
        &self,
        offramp_address: Address,
        merkle_roots: &[MerkleRoot],
        signatures: &[Signature],
    ) -> RmnResult<()>;

    /// Whether `subject` is cursed, directly or through a global curse.
    fn is_cursed(&self, subject: &Subject) -> bool;

    /// Whether the global curse subject is cursed.
    fn is_globally_cursed(&self) -> bool;

    /// Legacy blessing check. `IsBlessedNotAvailable` when no legacy oracle
    /// is configured.
    fn is_blessed(&self, tagged_root: &TaggedRoot) -> RmnResult<bool>;
}

/// Full RMN remote API: governance mutations plus read-only getters.
pub trait RmnRemoteApi: Rmn {
    // =========================================================================
    // Governance (owner only)
    // =========================================================================

    /// Replace the active config. Increments the version on success.
    fn set_config(&self, caller: Address, config: Config) -> RmnResult<()>;

    /// Curse a single subject.
    fn curse(&self, caller: Address, subject: Subject) -> RmnResult<()> {
        self.curse_many(caller, &[subject])
    }

    /// Curse several subjects atomically.
    fn curse_many(&self, caller: Address, subjects: &[Subject]) -> RmnResult<()>;

    /// Uncurse a single subject.
    fn uncurse(&self, caller: Address, subject: Subject) -> RmnResult<()> {
        self.uncurse_many(caller, &[subject])
    }

    /// Uncurse several subjects atomically.
    fn uncurse_many(&self, caller: Address, subjects: &[Subject]) -> RmnResult<()>;

    /// Propose a new owner.
    fn transfer_ownership(&self, caller: Address, to: Address) -> RmnResult<()>;

    /// Accept a pending ownership proposal.
    fn accept_ownership(&self, caller: Address) -> RmnResult<()>;

    // =========================================================================
    // Getters
    // =========================================================================

    /// All currently cursed subjects.
    fn get_cursed_subjects(&self) -> Vec<Subject>;

    /// `(version, config)` of the active config. Version 0 means unset.
    fn get_versioned_config(&self) -> VersionedConfig;

    /// Domain separation tag prefixed to every report digest.
    fn get_report_digest_header(&self) -> Hash;

    /// Chain selector this verifier is deployed for.
    fn get_local_chain_selector(&self) -> u64;

    /// Current owner.
    fn owner(&self) -> Address;

    /// Contract type and version string.
    fn type_and_version(&self) -> &'static str;
}
