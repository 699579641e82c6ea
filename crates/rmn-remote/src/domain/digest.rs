//! # Report Digest
//!
//! Builds the digest RMN nodes sign over a batch of merkle roots.
//!
//! The preimage is the Ethereum ABI encoding of
//! `(bytes32 header, Report)` where
//!
//! ```text
//! Report = (uint256 destChainId, uint64 destChainSelector,
//!           address rmnRemoteContractAddress, address offrampAddress,
//!           bytes32 rmnHomeContractConfigDigest, MerkleRoot[] merkleRoots)
//! MerkleRoot = (uint64 sourceChainSelector, bytes onRampAddress,
//!               uint64 minSeqNr, uint64 maxSeqNr, bytes32 merkleRoot)
//! ```
//!
//! Head/tail encoding gives every dynamic field an explicit offset and length,
//! so no two distinct reports share a preimage. The chain identity, the
//! verifier's own address, the calling off-ramp and the active config digest
//! are all bound into every signature.

use super::entities::{Address, Hash, MerkleRoot};
use sha3::{Digest, Keccak256};

/// Domain separation tag for RMN v1.6 any-to-EVM reports.
pub const RMN_V1_6_ANY2EVM_REPORT: Hash = [
    0x96, 0x51, 0x94, 0x37, 0x83, 0xdb, 0xf8, 0x19, 0x35, 0xa6, 0x0e, 0x98, 0xf2, 0x18, 0xa9, 0xd9,
    0xb5, 0xb2, 0x88, 0x23, 0xfb, 0x22, 0x28, 0xbb, 0xd9, 0x13, 0x20, 0xd6, 0x32, 0xfa, 0xcf, 0x53,
];

const WORD: usize = 32;

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Identity of the verifier deployment, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportBinding {
    /// Chain id of the chain hosting the verifier.
    pub dest_chain_id: u64,
    /// Chain selector of the chain hosting the verifier.
    pub local_chain_selector: u64,
    /// Address of the verifier itself.
    pub rmn_remote_address: Address,
}

/// Fully bound report header, minus the merkle roots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportContext {
    /// Deployment identity.
    pub binding: ReportBinding,
    /// Off-ramp the roots are being verified for.
    pub offramp_address: Address,
    /// Digest of the active config.
    pub config_digest: Hash,
}

/// ABI-encode the report preimage.
pub fn encode_report(context: &ReportContext, merkle_roots: &[MerkleRoot]) -> Vec<u8> {
    let roots = encode_merkle_roots(merkle_roots);
    let mut out = Vec::with_capacity(8 * WORD + roots.len());

    // Outer tuple head: header, offset to the (dynamic) Report tuple.
    out.extend_from_slice(&RMN_V1_6_ANY2EVM_REPORT);
    out.extend_from_slice(&word_usize(2 * WORD));

    // Report tuple head.
    out.extend_from_slice(&word_u64(context.binding.dest_chain_id));
    out.extend_from_slice(&word_u64(context.binding.local_chain_selector));
    out.extend_from_slice(&word_address(&context.binding.rmn_remote_address));
    out.extend_from_slice(&word_address(&context.offramp_address));
    out.extend_from_slice(&context.config_digest);
    out.extend_from_slice(&word_usize(6 * WORD));

    out.extend_from_slice(&roots);
    out
}

/// Digest signed by RMN nodes: `keccak256(encode_report(..))`.
pub fn report_digest(context: &ReportContext, merkle_roots: &[MerkleRoot]) -> Hash {
    keccak256(&encode_report(context, merkle_roots))
}

// =============================================================================
// ABI helpers
// =============================================================================

fn word_u64(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn word_usize(value: usize) -> [u8; WORD] {
    word_u64(value as u64)
}

fn word_address(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 20..].copy_from_slice(address);
    word
}

/// `bytes`: length word, then data right-padded to a word boundary.
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&word_usize(data.len()));
    out.extend_from_slice(data);
    out.resize(WORD + padded, 0);
    out
}

fn encode_merkle_root(root: &MerkleRoot) -> Vec<u8> {
    let mut out = Vec::with_capacity(7 * WORD);
    out.extend_from_slice(&word_u64(root.source_chain_selector));
    out.extend_from_slice(&word_usize(5 * WORD));
    out.extend_from_slice(&word_u64(root.min_seq_nr));
    out.extend_from_slice(&word_u64(root.max_seq_nr));
    out.extend_from_slice(&root.merkle_root);
    out.extend_from_slice(&encode_bytes(&root.on_ramp_address));
    out
}

/// Dynamic array of dynamic tuples: length, per-element offsets (relative to
/// the first offset word), then the element encodings.
fn encode_merkle_roots(roots: &[MerkleRoot]) -> Vec<u8> {
    let elements: Vec<Vec<u8>> = roots.iter().map(encode_merkle_root).collect();
    let body_len: usize = elements.iter().map(Vec::len).sum();

    let mut out = Vec::with_capacity(WORD + roots.len() * WORD + body_len);
    out.extend_from_slice(&word_usize(roots.len()));

    let mut offset = roots.len() * WORD;
    for element in &elements {
        out.extend_from_slice(&word_usize(offset));
        offset += element.len();
    }
    for element in elements {
        out.extend_from_slice(&element);
    }
    out
}
