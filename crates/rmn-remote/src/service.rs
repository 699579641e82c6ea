//! RMN Remote Service - ties config, curses, ownership and verification
//! together behind the inbound ports.
//!
//! ## Concurrency
//!
//! All mutations go through one writer lock. Each mutation clones the last
//! committed state, applies the change to the copy and swaps it in only on
//! success, so a failed call leaves nothing behind. Readers take an `Arc`
//! snapshot of the committed state and never see a half-applied update.
//!
//! Reads are not strictly lock-free: taking a snapshot holds the `RwLock`
//! read guard just long enough to clone the `Arc`. Verification and curse
//! checks then run without any lock, and the writer only takes the write
//! guard for the final pointer swap.

use crate::config::RmnRemoteSettings;
use crate::domain::config_store::{ConfigStore, QuorumPolicy};
use crate::domain::curse_registry::CurseRegistry;
use crate::domain::digest::{ReportBinding, RMN_V1_6_ANY2EVM_REPORT};
use crate::domain::entities::{
    Address, Config, Hash, MerkleRoot, Signature, Subject, TaggedRoot, VersionedConfig,
};
use crate::domain::errors::{RmnError, RmnResult};
use crate::domain::events::RmnEvent;
use crate::domain::ownership::Ownership;
use crate::domain::quorum::QuorumVerifier;
use crate::metrics;
use crate::ports::inbound::{Rmn, RmnRemoteApi};
use crate::ports::outbound::{EventSink, LegacyBlessOracle, SignatureRecovery};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Contract type and version reported by [`RmnRemoteApi::type_and_version`].
pub const TYPE_AND_VERSION: &str = "RMNRemote 1.6.0-dev";

/// Committed state. Cloning is cheap: the stores sit behind `Arc`s.
#[derive(Clone, Debug)]
struct RemoteState {
    ownership: Ownership,
    config: Arc<ConfigStore>,
    curses: Arc<CurseRegistry>,
}

/// RMN remote verifier.
pub struct RmnRemoteService<R, E>
where
    R: SignatureRecovery,
    E: EventSink,
{
    recovery: Arc<R>,
    events: Arc<E>,
    legacy: Option<Arc<dyn LegacyBlessOracle>>,
    binding: ReportBinding,
    policy: QuorumPolicy,
    state: RwLock<Arc<RemoteState>>,
    writer: Mutex<()>,
}

impl<R, E> RmnRemoteService<R, E>
where
    R: SignatureRecovery,
    E: EventSink,
{
    /// Create a verifier with no config and no curses.
    ///
    /// Fails with `ZeroValueNotAllowed` for a zero local chain selector and
    /// `OwnerCannotBeZero` for a zero owner.
    pub fn new(
        settings: &RmnRemoteSettings,
        recovery: Arc<R>,
        events: Arc<E>,
        legacy: Option<Arc<dyn LegacyBlessOracle>>,
    ) -> RmnResult<Self> {
        if settings.local_chain_selector == 0 {
            return Err(RmnError::ZeroValueNotAllowed);
        }
        let ownership = Ownership::new(settings.owner)?;

        info!(
            local_chain_selector = settings.local_chain_selector,
            dest_chain_id = settings.dest_chain_id,
            owner = %hex::encode(settings.owner),
            policy = ?settings.quorum_policy,
            "[rmn-remote] Verifier created"
        );

        Ok(Self {
            recovery,
            events,
            legacy,
            binding: ReportBinding {
                dest_chain_id: settings.dest_chain_id,
                local_chain_selector: settings.local_chain_selector,
                rmn_remote_address: settings.contract_address,
            },
            policy: settings.quorum_policy,
            state: RwLock::new(Arc::new(RemoteState {
                ownership,
                config: Arc::new(ConfigStore::new()),
                curses: Arc::new(CurseRegistry::new()),
            })),
            writer: Mutex::new(()),
        })
    }

    /// Address the verifier is deployed at.
    pub fn contract_address(&self) -> Address {
        self.binding.rmn_remote_address
    }

    /// Owner proposed by the last `transfer_ownership`, if any.
    pub fn pending_owner(&self) -> Option<Address> {
        self.snapshot().ownership.pending_owner()
    }

    /// Signer-count policy enforced by `set_config`.
    pub fn quorum_policy(&self) -> QuorumPolicy {
        self.policy
    }

    fn snapshot(&self) -> Arc<RemoteState> {
        self.state.read().clone()
    }

    /// Run `apply` against a copy of the committed state; commit and publish
    /// its events only if it succeeds.
    fn mutate<F>(&self, operation: &'static str, apply: F) -> RmnResult<()>
    where
        F: FnOnce(&mut RemoteState) -> RmnResult<Vec<RmnEvent>>,
    {
        let _writer = self.writer.lock();
        let mut next = RemoteState::clone(&self.snapshot());

        let events = match apply(&mut next) {
            Ok(events) => events,
            Err(err) => {
                warn!(operation, error = %err, "[rmn-remote] Rejected");
                return Err(err);
            }
        };

        metrics::set_config_version(next.config.version());
        metrics::set_cursed_subjects(next.curses.len());
        *self.state.write() = Arc::new(next);

        // Still under the writer lock, so sinks observe commit order
        for event in events {
            self.events.publish(event);
        }
        Ok(())
    }
}

impl<R, E> Rmn for RmnRemoteService<R, E>
where
    R: SignatureRecovery,
    E: EventSink,
{
    fn verify(
        &self,
        offramp_address: Address,
        merkle_roots: &[MerkleRoot],
        signatures: &[Signature],
    ) -> RmnResult<()> {
        let state = self.snapshot();
        let verifier = QuorumVerifier::new(state.config.as_ref(), self.recovery.as_ref());

        match verifier.verify(&self.binding, offramp_address, merkle_roots, signatures) {
            Ok(digest) => {
                debug!(
                    offramp = %hex::encode(offramp_address),
                    roots = merkle_roots.len(),
                    signatures = signatures.len(),
                    config_version = state.config.version(),
                    digest = %hex::encode(digest),
                    "[rmn-remote] Report verified"
                );
                metrics::record_verification_ok();
                Ok(())
            }
            Err(err) => {
                warn!(
                    offramp = %hex::encode(offramp_address),
                    signatures = signatures.len(),
                    error = %err,
                    "[rmn-remote] Report rejected"
                );
                metrics::record_verification_failure(err.code());
                Err(err)
            }
        }
    }

    fn is_cursed(&self, subject: &Subject) -> bool {
        self.snapshot().curses.is_cursed(subject)
    }

    fn is_globally_cursed(&self) -> bool {
        self.snapshot().curses.is_globally_cursed()
    }

    fn is_blessed(&self, tagged_root: &TaggedRoot) -> RmnResult<bool> {
        match &self.legacy {
            Some(oracle) => Ok(oracle.is_blessed(tagged_root)),
            None => Err(RmnError::IsBlessedNotAvailable),
        }
    }
}

impl<R, E> RmnRemoteApi for RmnRemoteService<R, E>
where
    R: SignatureRecovery,
    E: EventSink,
{
    fn set_config(&self, caller: Address, config: Config) -> RmnResult<()> {
        let policy = self.policy;
        self.mutate("set_config", |state| {
            state.ownership.only_owner(caller)?;
            let store = state.config.with_config(config, policy)?;

            info!(
                version = store.version(),
                signers = store.config().signers.len(),
                f = store.f(),
                digest = %hex::encode(store.config().rmn_home_contract_config_digest),
                "[rmn-remote] Config set"
            );
            let event = RmnEvent::ConfigSet {
                version: store.version(),
                config: store.config().clone(),
            };
            state.config = Arc::new(store);
            Ok(vec![event])
        })
    }

    fn curse_many(&self, caller: Address, subjects: &[Subject]) -> RmnResult<()> {
        self.mutate("curse", |state| {
            state.ownership.only_owner(caller)?;
            let mut curses = CurseRegistry::clone(&state.curses);
            curses.curse(subjects)?;

            info!(
                subjects = ?subjects,
                total = curses.len(),
                "[rmn-remote] Cursed"
            );
            state.curses = Arc::new(curses);
            Ok(vec![RmnEvent::Cursed {
                subjects: subjects.to_vec(),
            }])
        })
    }

    fn uncurse_many(&self, caller: Address, subjects: &[Subject]) -> RmnResult<()> {
        self.mutate("uncurse", |state| {
            state.ownership.only_owner(caller)?;
            let mut curses = CurseRegistry::clone(&state.curses);
            curses.uncurse(subjects)?;

            info!(
                subjects = ?subjects,
                total = curses.len(),
                "[rmn-remote] Uncursed"
            );
            state.curses = Arc::new(curses);
            Ok(vec![RmnEvent::Uncursed {
                subjects: subjects.to_vec(),
            }])
        })
    }

    fn transfer_ownership(&self, caller: Address, to: Address) -> RmnResult<()> {
        self.mutate("transfer_ownership", |state| {
            let event = state.ownership.transfer_ownership(caller, to)?;
            info!(to = %hex::encode(to), "[rmn-remote] Ownership transfer requested");
            Ok(vec![event])
        })
    }

    fn accept_ownership(&self, caller: Address) -> RmnResult<()> {
        self.mutate("accept_ownership", |state| {
            let event = state.ownership.accept_ownership(caller)?;
            info!(owner = %hex::encode(caller), "[rmn-remote] Ownership transferred");
            Ok(vec![event])
        })
    }

    fn get_cursed_subjects(&self) -> Vec<Subject> {
        self.snapshot().curses.cursed_subjects()
    }

    fn get_versioned_config(&self) -> VersionedConfig {
        self.snapshot().config.versioned_config()
    }

    fn get_report_digest_header(&self) -> Hash {
        RMN_V1_6_ANY2EVM_REPORT
    }

    fn get_local_chain_selector(&self) -> u64 {
        self.binding.local_chain_selector
    }

    fn owner(&self) -> Address {
        self.snapshot().ownership.owner()
    }

    fn type_and_version(&self) -> &'static str {
        TYPE_AND_VERSION
    }
}
