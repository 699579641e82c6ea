//! # Domain Layer
//!
//! Pure verification and governance logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod config_store;
pub mod curse_registry;
pub mod digest;
pub mod entities;
pub mod errors;
pub mod events;
pub mod ownership;
pub mod quorum;

pub use config_store::{validate_config, ConfigStore, QuorumPolicy};
pub use curse_registry::CurseRegistry;
pub use digest::{keccak256, report_digest, ReportBinding, ReportContext, RMN_V1_6_ANY2EVM_REPORT};
pub use entities::*;
pub use errors::{RmnError, RmnResult};
pub use events::RmnEvent;
pub use ownership::Ownership;
pub use quorum::QuorumVerifier;
