//! # RMN Remote Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks of report verification
//! └── src/
//!     └── integration/  # proxy, governance and event-stream flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rmn-tests
//!
//! # Benchmarks
//! cargo bench -p rmn-tests
//! ```

pub mod integration;
