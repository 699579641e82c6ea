//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that governance and off-ramps call
//! - **Outbound (Driven)**: Capabilities this crate needs injected

pub mod inbound;
pub mod outbound;
