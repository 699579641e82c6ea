//! Construction parameters and logging settings, loaded from defaults, JSON
//! or environment variables.

use crate::domain::config_store::QuorumPolicy;
use crate::domain::entities::Address;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Settings parsing errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An environment variable held a value that does not parse.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Parse failure
        reason: String,
    },

    /// JSON settings failed to parse.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable construction parameters of an RMN remote verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RmnRemoteSettings {
    /// Chain selector of the hosting chain. Must be non-zero.
    pub local_chain_selector: u64,
    /// Chain id of the hosting chain.
    pub dest_chain_id: u64,
    /// Address the verifier is deployed at.
    #[serde(with = "hex_address")]
    pub contract_address: Address,
    /// Initial owner. Must be non-zero.
    #[serde(with = "hex_address")]
    pub owner: Address,
    /// Signer-count bound enforced by `set_config`.
    pub quorum_policy: QuorumPolicy,
}

impl Default for RmnRemoteSettings {
    fn default() -> Self {
        Self {
            local_chain_selector: 0,
            dest_chain_id: 0,
            contract_address: [0u8; 20],
            owner: [0u8; 20],
            quorum_policy: QuorumPolicy::ByzantineMajority,
        }
    }
}

impl RmnRemoteSettings {
    /// Load settings from environment variables, falling back to defaults for
    /// unset variables.
    ///
    /// # Environment Variables
    ///
    /// - `RMN_LOCAL_CHAIN_SELECTOR`: decimal chain selector
    /// - `RMN_DEST_CHAIN_ID`: decimal chain id
    /// - `RMN_CONTRACT_ADDRESS`: hex address, optional `0x`
    /// - `RMN_OWNER`: hex address, optional `0x`
    /// - `RMN_QUORUM_POLICY`: `byzantine` (default) or `simple`
    pub fn from_env() -> Result<Self, SettingsError> {
        let defaults = Self::default();
        Ok(Self {
            local_chain_selector: env_parsed("RMN_LOCAL_CHAIN_SELECTOR")?
                .unwrap_or(defaults.local_chain_selector),
            dest_chain_id: env_parsed("RMN_DEST_CHAIN_ID")?.unwrap_or(defaults.dest_chain_id),
            contract_address: env_address("RMN_CONTRACT_ADDRESS")?
                .unwrap_or(defaults.contract_address),
            owner: env_address("RMN_OWNER")?.unwrap_or(defaults.owner),
            quorum_policy: env_parsed("RMN_QUORUM_POLICY")?.unwrap_or(defaults.quorum_policy),
        })
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `rmn_remote=debug`).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogSettings {
    /// Load from `RMN_LOG_LEVEL` (or `RUST_LOG`) and `RMN_JSON_LOGS`.
    pub fn from_env() -> Self {
        Self {
            level: env::var("RMN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json: env::var("RMN_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Parse a 20-byte hex address, with or without `0x`.
pub fn parse_address(value: &str) -> Result<Address, String> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("expected 20 bytes, got {}", b.len()))
}

fn env_parsed<T>(key: &'static str) -> Result<Option<T>, SettingsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| SettingsError::InvalidValue {
                key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn env_address(key: &'static str) -> Result<Option<Address>, SettingsError> {
    match env::var(key) {
        Ok(raw) => parse_address(&raw)
            .map(Some)
            .map_err(|reason| SettingsError::InvalidValue { key, reason }),
        Err(_) => Ok(None),
    }
}

mod hex_address {
    use super::parse_address;
    use crate::domain::entities::Address;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(address)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_address(&raw).map_err(serde::de::Error::custom)
    }
}
