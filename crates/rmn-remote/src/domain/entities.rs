//! # Domain Entities
//!
//! Core data structures for the RMN remote verifier: signer configuration,
//! merkle-root attestations, compact signatures and curse subjects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte hash (keccak256 digests, merkle roots, config digests).
pub type Hash = [u8; 32];

/// 20-byte account address.
pub type Address = [u8; 20];

/// The zero address. Never a valid owner, signer or proxy target.
pub const ZERO_ADDRESS: Address = [0u8; 20];

// =============================================================================
// Signer configuration
// =============================================================================

/// A single RMN node authorized to sign reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    /// Address recovered from this node's report signatures.
    pub onchain_public_key: Address,
    /// Position of the node in the off-chain home configuration.
    pub node_index: u64,
}

impl Signer {
    /// Create a new signer entry.
    pub fn new(onchain_public_key: Address, node_index: u64) -> Self {
        Self {
            onchain_public_key,
            node_index,
        }
    }
}

/// Signer set and fault-tolerance parameter.
///
/// Replaced wholesale by `set_config`, never patched in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Opaque id of the off-chain governed configuration this set mirrors.
    pub rmn_home_contract_config_digest: Hash,
    /// Signers ordered by strictly increasing `node_index`.
    pub signers: Vec<Signer>,
    /// Maximum number of faulty signers tolerated. `f + 1` signatures form a quorum.
    pub f: u64,
}

/// A config together with the version it was committed under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedConfig {
    /// Zero until the first successful `set_config`, then incremented by one per call.
    pub version: u32,
    /// The config committed at `version`.
    pub config: Config,
}

// =============================================================================
// Attestations
// =============================================================================

/// Commitment to a contiguous sequence-number range of messages from one
/// source chain's outbound ramp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleRoot {
    /// Chain selector of the source chain.
    pub source_chain_selector: u64,
    /// Source on-ramp address, in the source chain's native encoding.
    pub on_ramp_address: Vec<u8>,
    /// First sequence number covered (inclusive).
    pub min_seq_nr: u64,
    /// Last sequence number covered (inclusive).
    pub max_seq_nr: u64,
    /// Root over the covered messages.
    pub merkle_root: Hash,
}

/// Compact ECDSA signature. The recovery id is not carried; see
/// [`crate::adapters::secp256k1`] for how it is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// R component (32 bytes, big-endian)
    pub r: Hash,
    /// S component (32 bytes, big-endian)
    pub s: Hash,
}

/// Root tagged with the commit store that produced it (legacy blessing model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedRoot {
    /// Commit store that committed `root`.
    pub commit_store: Address,
    /// The committed merkle root.
    pub root: Hash,
}

// =============================================================================
// Curse subjects
// =============================================================================

/// A 16-byte curse scope: a chain-derived subject or the global sentinel.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subject(pub [u8; 16]);

/// Reserved subject that curses every lane at once.
pub const GLOBAL_CURSE_SUBJECT: Subject = Subject([
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
]);

impl Subject {
    /// Subject for a single chain: the selector, big-endian, in the low 8 bytes.
    pub fn from_chain_selector(chain_selector: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[8..].copy_from_slice(&chain_selector.to_be_bytes());
        Self(bytes)
    }

    /// Raw subject bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Whether this is the reserved global sentinel.
    pub fn is_global(&self) -> bool {
        *self == GLOBAL_CURSE_SUBJECT
    }
}

impl From<[u8; 16]> for Subject {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject({})", self)
    }
}
