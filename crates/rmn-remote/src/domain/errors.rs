//! # RMN Errors
//!
//! Every failure aborts the whole call with no state change. None are
//! retried internally.

use super::entities::Subject;
use thiserror::Error;

/// Errors returned by RMN remote operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RmnError {
    // =========================================================================
    // Governance
    // =========================================================================
    /// Caller is not the current owner.
    #[error("Only callable by owner")]
    OnlyCallableByOwner,

    /// Caller is not the pending owner.
    #[error("Must be proposed owner")]
    MustBeProposedOwner,

    /// Owner tried to transfer ownership to itself.
    #[error("Cannot transfer to self")]
    CannotTransferToSelf,

    /// Zero address supplied as owner.
    #[error("Owner cannot be zero")]
    OwnerCannotBeZero,

    /// Zero address supplied where a contract address is required.
    #[error("Zero address not allowed")]
    ZeroAddressNotAllowed,

    // =========================================================================
    // Config validation
    // =========================================================================
    /// Two signers share an on-chain public key.
    #[error("Duplicate onchain public key")]
    DuplicateOnchainPublicKey,

    /// Signer node indexes are not strictly increasing.
    #[error("Invalid signer order")]
    InvalidSignerOrder,

    /// Signer set too small for the requested `f`.
    #[error("Not enough signers")]
    NotEnoughSigners,

    /// A value that must be non-zero was zero.
    #[error("Zero value not allowed")]
    ZeroValueNotAllowed,

    /// `verify` called before any config was set.
    #[error("Config not set")]
    ConfigNotSet,

    /// The config version counter is exhausted.
    #[error("Config version overflow")]
    ConfigVersionOverflow,

    // =========================================================================
    // Verification
    // =========================================================================
    /// A signature did not recover to a non-zero address.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Recovered signers are not strictly ascending.
    #[error("Out of order signatures")]
    OutOfOrderSignatures,

    /// A recovered signer is not in the current config.
    #[error("Unexpected signer")]
    UnexpectedSigner,

    /// Fewer than `f + 1` signatures supplied.
    #[error("Threshold not met")]
    ThresholdNotMet,

    // =========================================================================
    // Curse state
    // =========================================================================
    /// Subject is already cursed.
    #[error("Already cursed: {0}")]
    AlreadyCursed(Subject),

    /// Subject is not cursed.
    #[error("Not cursed: {0}")]
    NotCursed(Subject),

    // =========================================================================
    // Compatibility
    // =========================================================================
    /// No legacy blessing oracle was configured.
    #[error("isBlessed not available")]
    IsBlessedNotAvailable,
}

impl RmnError {
    /// Stable short name, used as a log field and metric label.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OnlyCallableByOwner => "OnlyCallableByOwner",
            Self::MustBeProposedOwner => "MustBeProposedOwner",
            Self::CannotTransferToSelf => "CannotTransferToSelf",
            Self::OwnerCannotBeZero => "OwnerCannotBeZero",
            Self::ZeroAddressNotAllowed => "ZeroAddressNotAllowed",
            Self::DuplicateOnchainPublicKey => "DuplicateOnchainPublicKey",
            Self::InvalidSignerOrder => "InvalidSignerOrder",
            Self::NotEnoughSigners => "NotEnoughSigners",
            Self::ZeroValueNotAllowed => "ZeroValueNotAllowed",
            Self::ConfigNotSet => "ConfigNotSet",
            Self::ConfigVersionOverflow => "ConfigVersionOverflow",
            Self::InvalidSignature => "InvalidSignature",
            Self::OutOfOrderSignatures => "OutOfOrderSignatures",
            Self::UnexpectedSigner => "UnexpectedSigner",
            Self::ThresholdNotMet => "ThresholdNotMet",
            Self::AlreadyCursed(_) => "AlreadyCursed",
            Self::NotCursed(_) => "NotCursed",
            Self::IsBlessedNotAvailable => "IsBlessedNotAvailable",
        }
    }
}

/// Result type for RMN operations.
pub type RmnResult<T> = Result<T, RmnError>;
