//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fee ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: The sample rosters and fixed dates used across tests
//! - `builders`: Builder patterns for test records
//! - `assertions`: Custom assertion helpers for ledger results
//! - `generators`: Property-based test data generators
//! - `logging`: One-time log subscriber setup for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_test_tracing;
