//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger and settlement test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built ledgers for well-known scenarios
//! - `builders`: Builder patterns for ledger and bill construction
//! - `assertions`: Custom assertion helpers for balances and flows
//! - `generators`: Property-based generators of valid ledgers

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
