//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod events;
pub mod legacy;
pub mod secp256k1;

pub use events::{BroadcastEventSink, FanOutEventSink, InMemoryEventLog, TracingEventSink};
pub use legacy::StaticBlessOracle;
pub use secp256k1::Secp256k1Recovery;
