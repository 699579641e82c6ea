//! # Integration Tests
//!
//! Flows that span the verifier, the proxy and the event sinks.

pub mod flows;
pub mod support;
