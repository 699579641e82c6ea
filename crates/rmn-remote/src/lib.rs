//! # RMN Remote Verifier
//!
//! On-destination half of a Risk Management Network: accepts cross-chain
//! commit reports only when a quorum of authorized off-chain signers has
//! signed them, and keeps an owner-managed registry of cursed subjects that
//! lanes consult before moving messages.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): config store, quorum verification, curse
//!   registry, ownership and the report digest. No I/O.
//! - **Ports Layer** (`ports/`): inbound API traits and outbound capabilities
//!   (signature recovery, legacy blessing, event sinks)
//! - **Adapters** (`adapters/`): k256 recovery, event sinks, in-memory legacy oracle
//! - **Service Layer** (`service.rs`): wires the domain to the ports with a
//!   single writer and snapshot readers
//! - **Proxy** (`proxy.rs`): stable, owner-swappable indirection for consumers
//!
//! ## Security Notes
//!
//! - Every report digest binds the chain, this verifier's address, the calling
//!   off-ramp and the active config digest, so signatures do not replay across
//!   any of them.
//! - Signatures must recover to strictly ascending addresses; one signer can
//!   never be counted twice.
//! - A rejected call leaves no trace: state and the event stream are unchanged.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod proxy;
pub mod service;
pub mod telemetry;

// Re-export public API
pub use adapters::secp256k1::{address_from_pubkey, sign_digest, SigningKey};
pub use adapters::{
    BroadcastEventSink, FanOutEventSink, InMemoryEventLog, Secp256k1Recovery, StaticBlessOracle,
    TracingEventSink,
};
pub use config::{LogSettings, RmnRemoteSettings, SettingsError};
pub use domain::config_store::QuorumPolicy;
pub use domain::digest::{keccak256, report_digest, ReportBinding, ReportContext};
pub use domain::entities::{
    Address, Config, Hash, MerkleRoot, Signature, Signer, Subject, TaggedRoot, VersionedConfig,
    GLOBAL_CURSE_SUBJECT, ZERO_ADDRESS,
};
pub use domain::errors::{RmnError, RmnResult};
pub use domain::events::RmnEvent;
pub use ports::inbound::{Rmn, RmnRemoteApi};
pub use ports::outbound::{EventSink, LegacyBlessOracle, RecoveryError, SignatureRecovery};
pub use proxy::RmnProxy;
pub use service::RmnRemoteService;
pub use telemetry::init_logging;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
