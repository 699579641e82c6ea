//! # RMN Proxy
//!
//! Stable entry point in front of the current RMN implementation. Consumers
//! hold the proxy; the owner swaps the implementation behind it with
//! [`RmnProxy::set_arm`] without touching any consumer.

use crate::domain::entities::{Address, MerkleRoot, Signature, Subject, TaggedRoot, ZERO_ADDRESS};
use crate::domain::errors::{RmnError, RmnResult};
use crate::domain::events::RmnEvent;
use crate::domain::ownership::Ownership;
use crate::ports::inbound::Rmn;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Contract type and version of the proxy.
pub const PROXY_TYPE_AND_VERSION: &str = "ARMProxy 1.0.0";

struct ProxyState {
    ownership: Ownership,
    arm: Address,
    target: Arc<dyn Rmn>,
}

/// Owner-gated indirection to an [`Rmn`] implementation.
pub struct RmnProxy<E: EventSink> {
    state: RwLock<ProxyState>,
    events: Arc<E>,
}

impl<E: EventSink> RmnProxy<E> {
    /// Create a proxy owned by `owner` pointing at `target` deployed at `arm`.
    /// Emits `ARMSet(arm)`.
    pub fn new(owner: Address, arm: Address, target: Arc<dyn Rmn>, events: Arc<E>) -> RmnResult<Self> {
        if arm == ZERO_ADDRESS {
            return Err(RmnError::ZeroAddressNotAllowed);
        }
        let proxy = Self {
            state: RwLock::new(ProxyState {
                ownership: Ownership::new(owner)?,
                arm,
                target,
            }),
            events,
        };
        info!(arm = %hex::encode(arm), "[rmn-proxy] Proxy created");
        proxy.events.publish(RmnEvent::ArmSet { arm });
        Ok(proxy)
    }

    /// Point the proxy at a new implementation. Owner only.
    pub fn set_arm(&self, caller: Address, arm: Address, target: Arc<dyn Rmn>) -> RmnResult<()> {
        let mut state = self.state.write();
        if let Err(err) = state.ownership.only_owner(caller) {
            warn!(error = %err, "[rmn-proxy] set_arm rejected");
            return Err(err);
        }
        if arm == ZERO_ADDRESS {
            warn!("[rmn-proxy] set_arm rejected: zero address");
            return Err(RmnError::ZeroAddressNotAllowed);
        }

        state.arm = arm;
        state.target = target;
        info!(arm = %hex::encode(arm), "[rmn-proxy] ARM set");
        self.events.publish(RmnEvent::ArmSet { arm });
        Ok(())
    }

    /// Address of the current implementation.
    pub fn get_arm(&self) -> Address {
        self.state.read().arm
    }

    /// Propose a new owner.
    pub fn transfer_ownership(&self, caller: Address, to: Address) -> RmnResult<()> {
        let mut state = self.state.write();
        let mut ownership = state.ownership.clone();
        let event = match ownership.transfer_ownership(caller, to) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "[rmn-proxy] transfer_ownership rejected");
                return Err(err);
            }
        };
        state.ownership = ownership;
        info!(to = %hex::encode(to), "[rmn-proxy] Ownership transfer requested");
        self.events.publish(event);
        Ok(())
    }

    /// Accept a pending ownership proposal.
    pub fn accept_ownership(&self, caller: Address) -> RmnResult<()> {
        let mut state = self.state.write();
        let mut ownership = state.ownership.clone();
        let event = match ownership.accept_ownership(caller) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "[rmn-proxy] accept_ownership rejected");
                return Err(err);
            }
        };
        state.ownership = ownership;
        info!(owner = %hex::encode(caller), "[rmn-proxy] Ownership transferred");
        self.events.publish(event);
        Ok(())
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.state.read().ownership.owner()
    }

    /// Contract type and version string.
    pub fn type_and_version(&self) -> &'static str {
        PROXY_TYPE_AND_VERSION
    }

    fn target(&self) -> Arc<dyn Rmn> {
        Arc::clone(&self.state.read().target)
    }
}

impl<E: EventSink> Rmn for RmnProxy<E> {
    fn verify(
        &self,
        offramp_address: Address,
        merkle_roots: &[MerkleRoot],
        signatures: &[Signature],
    ) -> RmnResult<()> {
        self.target().verify(offramp_address, merkle_roots, signatures)
    }

    fn is_cursed(&self, subject: &Subject) -> bool {
        self.target().is_cursed(subject)
    }

    fn is_globally_cursed(&self) -> bool {
        self.target().is_globally_cursed()
    }

    fn is_blessed(&self, tagged_root: &TaggedRoot) -> RmnResult<bool> {
        self.target().is_blessed(tagged_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventLog;

    const OWNER: Address = [0x0F; 20];
    const STRANGER: Address = [0x5E; 20];

    /// Fixed answers, so forwarding is observable.
    struct FixedRmn {
        cursed: bool,
    }

    impl Rmn for FixedRmn {
        fn verify(&self, _: Address, _: &[MerkleRoot], _: &[Signature]) -> RmnResult<()> {
            if self.cursed {
                Err(RmnError::ThresholdNotMet)
            } else {
                Ok(())
            }
        }

        fn is_cursed(&self, _: &Subject) -> bool {
            self.cursed
        }

        fn is_globally_cursed(&self) -> bool {
            self.cursed
        }

        fn is_blessed(&self, _: &TaggedRoot) -> RmnResult<bool> {
            Ok(!self.cursed)
        }
    }

    fn proxy() -> (RmnProxy<InMemoryEventLog>, Arc<InMemoryEventLog>) {
        let log = Arc::new(InMemoryEventLog::new());
        let proxy = RmnProxy::new(
            OWNER,
            [0x01; 20],
            Arc::new(FixedRmn { cursed: false }),
            log.clone(),
        )
        .unwrap();
        (proxy, log)
    }

    #[test]
    fn test_new_emits_arm_set() {
        let (proxy, log) = proxy();
        assert_eq!(proxy.get_arm(), [0x01; 20]);
        assert_eq!(proxy.owner(), OWNER);
        assert_eq!(proxy.type_and_version(), "ARMProxy 1.0.0");
        assert_eq!(log.events(), vec![RmnEvent::ArmSet { arm: [0x01; 20] }]);
    }

    #[test]
    fn test_new_rejects_zero_arm() {
        let result = RmnProxy::new(
            OWNER,
            ZERO_ADDRESS,
            Arc::new(FixedRmn { cursed: false }),
            Arc::new(InMemoryEventLog::new()),
        );
        assert!(matches!(result, Err(RmnError::ZeroAddressNotAllowed)));
    }

    #[test]
    fn test_set_arm_swaps_target() {
        let (proxy, log) = proxy();
        let subject = Subject::from_chain_selector(1);
        assert!(!proxy.is_cursed(&subject));

        proxy
            .set_arm(OWNER, [0x02; 20], Arc::new(FixedRmn { cursed: true }))
            .unwrap();
        assert_eq!(proxy.get_arm(), [0x02; 20]);
        assert!(proxy.is_cursed(&subject));
        assert!(proxy.is_globally_cursed());
        assert_eq!(
            proxy.verify([0x03; 20], &[], &[]),
            Err(RmnError::ThresholdNotMet)
        );
        assert_eq!(log.last(), Some(RmnEvent::ArmSet { arm: [0x02; 20] }));
    }

    #[test]
    fn test_set_arm_guards() {
        let (proxy, log) = proxy();
        assert_eq!(
            proxy.set_arm(STRANGER, [0x02; 20], Arc::new(FixedRmn { cursed: true })),
            Err(RmnError::OnlyCallableByOwner)
        );
        assert_eq!(
            proxy.set_arm(OWNER, ZERO_ADDRESS, Arc::new(FixedRmn { cursed: true })),
            Err(RmnError::ZeroAddressNotAllowed)
        );
        assert_eq!(proxy.get_arm(), [0x01; 20]);
        assert!(!proxy.is_globally_cursed());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_rejected_ownership_calls_publish_nothing() {
        let (proxy, log) = proxy();
        assert_eq!(
            proxy.transfer_ownership(STRANGER, STRANGER),
            Err(RmnError::OnlyCallableByOwner)
        );
        assert_eq!(
            proxy.transfer_ownership(OWNER, OWNER),
            Err(RmnError::CannotTransferToSelf)
        );
        assert_eq!(
            proxy.accept_ownership(STRANGER),
            Err(RmnError::MustBeProposedOwner)
        );
        assert_eq!(proxy.owner(), OWNER);
        assert_eq!(log.len(), 1);

        proxy.transfer_ownership(OWNER, STRANGER).unwrap();
        assert_eq!(
            log.last(),
            Some(RmnEvent::OwnershipTransferRequested {
                from: OWNER,
                to: STRANGER
            })
        );
    }

    #[test]
    fn test_proxy_ownership_transfer() {
        let (proxy, _) = proxy();
        proxy.transfer_ownership(OWNER, STRANGER).unwrap();
        assert_eq!(
            proxy.accept_ownership(OWNER),
            Err(RmnError::MustBeProposedOwner)
        );
        proxy.accept_ownership(STRANGER).unwrap();
        assert_eq!(proxy.owner(), STRANGER);
        proxy
            .set_arm(STRANGER, [0x04; 20], Arc::new(FixedRmn { cursed: false }))
            .unwrap();
    }
}
