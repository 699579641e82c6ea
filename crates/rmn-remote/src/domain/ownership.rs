//! # Ownership Guard
//!
//! Two-phase owner handshake: the owner proposes, the proposed owner accepts.
//! Every mutating entry point checks [`Ownership::only_owner`] first.

use super::entities::{Address, ZERO_ADDRESS};
use super::errors::{RmnError, RmnResult};
use super::events::RmnEvent;

/// Current owner and, if a transfer is in flight, the proposed owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ownership {
    owner: Address,
    pending_owner: Option<Address>,
}

impl Ownership {
    /// Create ownership for `owner`. Rejects the zero address.
    pub fn new(owner: Address) -> RmnResult<Self> {
        if owner == ZERO_ADDRESS {
            return Err(RmnError::OwnerCannotBeZero);
        }
        Ok(Self {
            owner,
            pending_owner: None,
        })
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Proposed owner, if any.
    pub fn pending_owner(&self) -> Option<Address> {
        self.pending_owner
    }

    /// Fail unless `caller` is the current owner.
    pub fn only_owner(&self, caller: Address) -> RmnResult<()> {
        if caller != self.owner {
            return Err(RmnError::OnlyCallableByOwner);
        }
        Ok(())
    }

    /// Propose `to` as the next owner. Proposing the zero address clears any
    /// pending proposal.
    pub fn transfer_ownership(&mut self, caller: Address, to: Address) -> RmnResult<RmnEvent> {
        self.only_owner(caller)?;
        if to == caller {
            return Err(RmnError::CannotTransferToSelf);
        }

        self.pending_owner = (to != ZERO_ADDRESS).then_some(to);
        Ok(RmnEvent::OwnershipTransferRequested {
            from: self.owner,
            to,
        })
    }

    /// Complete a transfer. Only the proposed owner may call this.
    pub fn accept_ownership(&mut self, caller: Address) -> RmnResult<RmnEvent> {
        if self.pending_owner != Some(caller) {
            return Err(RmnError::MustBeProposedOwner);
        }

        let previous = self.owner;
        self.owner = caller;
        self.pending_owner = None;
        Ok(RmnEvent::OwnershipTransferred {
            from: previous,
            to: caller,
        })
    }
}
