//! # secp256k1 Signer Recovery
//!
//! [`SignatureRecovery`] backed by k256.
//!
//! Report signatures carry only `{r, s}`. Recovery behaves like
//! `ecrecover(digest, 27, r, s)`:
//!
//! - a low-S signature is recovered with recovery id 0;
//! - a high-S signature `(r, s)` is the same signature as `(r, n - s)` with
//!   recovery id 1, so it is normalized and recovered that way.
//!
//! Signers therefore publish the high-S form whenever their signature has an
//! odd-Y `R` point; [`sign_digest`] does exactly that.

use crate::domain::digest::keccak256;
use crate::domain::entities::{Address, Hash, Signature, ZERO_ADDRESS};
use crate::ports::outbound::{RecoveryError, SignatureRecovery};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

pub use k256::ecdsa::SigningKey;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// k256-backed signer recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl Secp256k1Recovery {
    /// Create a new recovery adapter.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureRecovery for Secp256k1Recovery {
    fn recover(&self, digest: &Hash, signature: &Signature) -> Result<Address, RecoveryError> {
        recover_address(digest, signature)
    }
}

/// Recover the signer address of `signature` over `digest`.
pub fn recover_address(digest: &Hash, signature: &Signature) -> Result<Address, RecoveryError> {
    // Rejects zero scalars and scalars >= n
    let sig = EcdsaSignature::from_scalars(signature.r, signature.s)
        .map_err(|_| RecoveryError::InvalidFormat)?;

    let (sig, recovery_id) = match sig.normalize_s() {
        Some(normalized) => (normalized, RecoveryId::new(true, false)),
        None => (sig, RecoveryId::new(false, false)),
    };

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| RecoveryError::RecoveryFailed)?;

    let address = address_from_pubkey(&key);
    if address == ZERO_ADDRESS {
        return Err(RecoveryError::RecoveryFailed);
    }
    Ok(address)
}

/// Derive the 20-byte address of a public key:
/// last 20 bytes of keccak256(uncompressed point without the 0x04 prefix).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Sign `digest` in the form [`recover_address`] expects.
pub fn sign_digest(key: &SigningKey, digest: &Hash) -> Result<Signature, RecoveryError> {
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|_| RecoveryError::InvalidFormat)?;

    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    // k256 always yields low S; odd-Y signatures are published as (r, n - s)
    if recovery_id.is_y_odd() {
        s = invert_s(&s);
    }
    Ok(Signature { r, s })
}

/// `n - s` over the secp256k1 order.
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
