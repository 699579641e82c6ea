//! # Config Store
//!
//! Holds the active signer set, `f`, the home config digest and the version
//! counter. Replaced wholesale by a validated `set_config`; older versions are
//! only observable through the `ConfigSet` event history.

use super::entities::{Address, Config, VersionedConfig};
use super::errors::{RmnError, RmnResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Minimum signer-set size required for a given `f`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumPolicy {
    /// `signers >= 2f + 1`: a quorum of `f + 1` always contains an honest
    /// signer even with `f` faulty nodes.
    #[default]
    ByzantineMajority,
    /// `signers >= f + 1`: only requires that a quorum is reachable.
    Simple,
}

impl QuorumPolicy {
    /// Minimum number of signers this policy requires for `f`.
    pub fn min_signers(&self, f: u64) -> u128 {
        let f = f as u128;
        match self {
            Self::ByzantineMajority => 2 * f + 1,
            Self::Simple => f + 1,
        }
    }
}

impl FromStr for QuorumPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byzantine" | "byzantine_majority" | "2f+1" => Ok(Self::ByzantineMajority),
            "simple" | "f+1" => Ok(Self::Simple),
            other => Err(format!("unknown quorum policy: {other}")),
        }
    }
}

/// Validate a candidate config. Checks run in a fixed order so the first
/// violated rule determines the error.
pub fn validate_config(config: &Config, policy: QuorumPolicy) -> RmnResult<()> {
    // 1. Unique signer addresses
    let mut seen = HashSet::with_capacity(config.signers.len());
    for signer in &config.signers {
        if !seen.insert(signer.onchain_public_key) {
            return Err(RmnError::DuplicateOnchainPublicKey);
        }
    }

    // 2. Strictly increasing node indexes
    if config
        .signers
        .windows(2)
        .any(|pair| pair[0].node_index >= pair[1].node_index)
    {
        return Err(RmnError::InvalidSignerOrder);
    }

    // 3. Non-zero digest and enough signers for f
    if config.rmn_home_contract_config_digest == [0u8; 32] {
        return Err(RmnError::ZeroValueNotAllowed);
    }
    if (config.signers.len() as u128) < policy.min_signers(config.f) {
        return Err(RmnError::NotEnoughSigners);
    }

    Ok(())
}

/// Active config plus an O(1) membership index over signer addresses.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    version: u32,
    config: Config,
    members: HashSet<Address>,
}

impl ConfigStore {
    /// Empty store: version 0, no signers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any config has ever been committed.
    pub fn is_set(&self) -> bool {
        self.version > 0
    }

    /// Current version (0 when unset).
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Current config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current fault-tolerance parameter.
    pub fn f(&self) -> u64 {
        self.config.f
    }

    /// Whether `address` is a signer in the current config.
    pub fn is_signer(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// `(version, config)` snapshot.
    pub fn versioned_config(&self) -> VersionedConfig {
        VersionedConfig {
            version: self.version,
            config: self.config.clone(),
        }
    }

    /// Build the successor store for `config`. `self` is left untouched, so a
    /// validation failure has no effect.
    pub fn with_config(&self, config: Config, policy: QuorumPolicy) -> RmnResult<Self> {
        validate_config(&config, policy)?;
        let version = self
            .version
            .checked_add(1)
            .ok_or(RmnError::ConfigVersionOverflow)?;
        let members = config
            .signers
            .iter()
            .map(|signer| signer.onchain_public_key)
            .collect();

        Ok(Self {
            version,
            config,
            members,
        })
    }
}
