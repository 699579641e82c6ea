//! Shared fixtures: a signing committee and a verifier configured for it.

use rmn_remote::{
    address_from_pubkey, report_digest, sign_digest, Address, Config, EventSink, MerkleRoot,
    QuorumPolicy, ReportBinding, ReportContext, RmnRemoteApi, RmnRemoteService,
    RmnRemoteSettings, RmnResult, Secp256k1Recovery, Signature, Signer, SigningKey,
};
use std::sync::Arc;

pub const OWNER: Address = [0x0F; 20];
pub const OFFRAMP: Address = [0x0E; 20];
pub const LOCAL_CHAIN_SELECTOR: u64 = 16015286601757825753;
pub const DEST_CHAIN_ID: u64 = 11155111;

/// Off-chain signers, sorted by address.
pub struct Committee {
    pub members: Vec<(SigningKey, Address)>,
}

impl Committee {
    /// Deterministic committee of `size` keys.
    pub fn new(size: usize) -> Self {
        let mut members: Vec<(SigningKey, Address)> = (1..=size)
            .map(|i| {
                let mut seed = [0u8; 32];
                seed[24..].copy_from_slice(&(i as u64).to_be_bytes());
                let key = SigningKey::from_slice(&seed).expect("valid scalar");
                let address = address_from_pubkey(key.verifying_key());
                (key, address)
            })
            .collect();
        members.sort_by_key(|(_, address)| *address);
        Self { members }
    }

    /// Config listing every member with fault tolerance `f`.
    pub fn config(&self, f: u64, config_digest: [u8; 32]) -> Config {
        Config {
            rmn_home_contract_config_digest: config_digest,
            signers: self
                .members
                .iter()
                .enumerate()
                .map(|(i, (_, address))| Signer::new(*address, i as u64))
                .collect(),
            f,
        }
    }

    /// Signatures of the first `count` members, in ascending address order.
    pub fn sign(&self, context: &ReportContext, roots: &[MerkleRoot], count: usize) -> Vec<Signature> {
        let digest = report_digest(context, roots);
        self.members
            .iter()
            .take(count)
            .map(|(key, _)| sign_digest(key, &digest).expect("signing succeeds"))
            .collect()
    }
}

pub fn settings(contract_address: Address) -> RmnRemoteSettings {
    RmnRemoteSettings {
        local_chain_selector: LOCAL_CHAIN_SELECTOR,
        dest_chain_id: DEST_CHAIN_ID,
        contract_address,
        owner: OWNER,
        quorum_policy: QuorumPolicy::ByzantineMajority,
    }
}

/// Report context a verifier deployed at `contract_address` checks against.
pub fn context(contract_address: Address, offramp: Address, config_digest: [u8; 32]) -> ReportContext {
    ReportContext {
        binding: ReportBinding {
            dest_chain_id: DEST_CHAIN_ID,
            local_chain_selector: LOCAL_CHAIN_SELECTOR,
            rmn_remote_address: contract_address,
        },
        offramp_address: offramp,
        config_digest,
    }
}

/// Verifier at `contract_address` configured with `committee`.
pub fn configured_remote<E: EventSink>(
    contract_address: Address,
    committee: &Committee,
    f: u64,
    config_digest: [u8; 32],
    events: Arc<E>,
) -> RmnResult<RmnRemoteService<Secp256k1Recovery, E>> {
    let remote = RmnRemoteService::new(
        &settings(contract_address),
        Arc::new(Secp256k1Recovery::new()),
        events,
        None,
    )?;
    remote.set_config(OWNER, committee.config(f, config_digest))?;
    Ok(remote)
}

/// `count` merkle roots from distinct source chains.
pub fn roots(count: usize) -> Vec<MerkleRoot> {
    (0..count)
        .map(|i| MerkleRoot {
            source_chain_selector: 1000 + i as u64,
            on_ramp_address: vec![i as u8; 20],
            min_seq_nr: 1,
            max_seq_nr: 100,
            merkle_root: [i as u8; 32],
        })
        .collect()
}
