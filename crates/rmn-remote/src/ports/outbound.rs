//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the verifier depends on but does not implement itself.

use crate::domain::entities::{Address, Hash, Signature, TaggedRoot};
use crate::domain::events::RmnEvent;
use thiserror::Error;

/// Failure of the signature recovery primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    /// R or S is zero or not below the curve order.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// No public key recovers from this digest and signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,
}

/// Signer recovery primitive.
///
/// Given a digest and a compact signature, return the signer's address or a
/// "no recovery" failure. Implementations never return the zero address.
pub trait SignatureRecovery: Send + Sync {
    /// Recover the address that produced `signature` over `digest`.
    fn recover(&self, digest: &Hash, signature: &Signature) -> Result<Address, RecoveryError>;
}

/// Predecessor blessing oracle, consulted only for migration compatibility.
pub trait LegacyBlessOracle: Send + Sync {
    /// Whether `tagged_root` was blessed under the legacy model.
    fn is_blessed(&self, tagged_root: &TaggedRoot) -> bool;
}

/// Destination for committed-mutation events.
///
/// Called once per committed mutation while the writer lock is held, so
/// implementations see events in commit order and must not block.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: RmnEvent);
}
