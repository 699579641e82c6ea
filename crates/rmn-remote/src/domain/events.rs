//! # Outgoing Events
//!
//! One event per committed mutation, published in commit order.

use super::entities::{Address, Config, Subject};
use serde::{Deserialize, Serialize};

/// Events emitted by the RMN remote verifier and its proxy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RmnEvent {
    /// A new config was committed.
    ConfigSet {
        /// Version the config was committed under.
        version: u32,
        /// The committed config.
        config: Config,
    },
    /// Subjects were cursed.
    Cursed {
        /// Newly cursed subjects, in call order.
        subjects: Vec<Subject>,
    },
    /// Subjects were uncursed.
    Uncursed {
        /// Removed subjects, in call order.
        subjects: Vec<Subject>,
    },
    /// Owner proposed a new owner.
    OwnershipTransferRequested {
        /// Current owner.
        from: Address,
        /// Proposed owner.
        to: Address,
    },
    /// Pending owner accepted ownership.
    OwnershipTransferred {
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
    },
    /// Proxy target changed.
    ArmSet {
        /// New target address.
        arm: Address,
    },
}

impl RmnEvent {
    /// Event name as it appears in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigSet { .. } => "ConfigSet",
            Self::Cursed { .. } => "Cursed",
            Self::Uncursed { .. } => "Uncursed",
            Self::OwnershipTransferRequested { .. } => "OwnershipTransferRequested",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::ArmSet { .. } => "ARMSet",
        }
    }
}
