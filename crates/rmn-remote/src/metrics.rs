//! # RMN Remote Metrics
//!
//! Prometheus metrics for report verification and governance state.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! rmn-remote = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `rmn_verifications_total` - Counter of accepted reports
//! - `rmn_verification_failures_total` - Counter of rejected reports (by reason)
//! - `rmn_config_version` - Gauge of the active config version
//! - `rmn_cursed_subjects` - Gauge of currently cursed subjects

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter, IntCounterVec,
    IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Reports that passed quorum verification
    pub static ref VERIFICATIONS: IntCounter = register_int_counter!(
        "rmn_verifications_total",
        "Total number of reports verified"
    )
    .expect("Failed to create VERIFICATIONS metric");

    /// Rejected reports, labeled by error code
    pub static ref VERIFICATION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "rmn_verification_failures_total",
        "Total number of reports rejected",
        &["reason"]
    )
    .expect("Failed to create VERIFICATION_FAILURES metric");

    /// Active config version (0 = unset)
    pub static ref CONFIG_VERSION: IntGauge = register_int_gauge!(
        "rmn_config_version",
        "Version of the active signer config"
    )
    .expect("Failed to create CONFIG_VERSION metric");

    /// Size of the cursed subject set
    pub static ref CURSED_SUBJECTS: IntGauge = register_int_gauge!(
        "rmn_cursed_subjects",
        "Number of currently cursed subjects"
    )
    .expect("Failed to create CURSED_SUBJECTS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted report
#[cfg(feature = "metrics")]
pub fn record_verification_ok() {
    VERIFICATIONS.inc();
}

/// Record a rejected report with its error code
#[cfg(feature = "metrics")]
pub fn record_verification_failure(reason: &str) {
    VERIFICATION_FAILURES.with_label_values(&[reason]).inc();
}

/// Update the active config version gauge
#[cfg(feature = "metrics")]
pub fn set_config_version(version: u32) {
    CONFIG_VERSION.set(i64::from(version));
}

/// Update the cursed subject gauge
#[cfg(feature = "metrics")]
pub fn set_cursed_subjects(count: usize) {
    CURSED_SUBJECTS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_verification_ok() {}

#[cfg(not(feature = "metrics"))]
pub fn record_verification_failure(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_config_version(_version: u32) {}

#[cfg(not(feature = "metrics"))]
pub fn set_cursed_subjects(_count: usize) {}
