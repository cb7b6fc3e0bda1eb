//! Core Kernel - Foundational types shared by the ledger and settlement crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed string identifiers for participants and bills
//! - Numeric tolerances and display rounding for `f64` amounts
//! - The common error type

pub mod identifiers;
pub mod precision;
pub mod error;

pub use identifiers::{ParticipantId, BillId};
pub use precision::{
    SHARE_TOLERANCE, SETTLEMENT_TOLERANCE, DISPLAY_DECIMALS, MAX_DISPLAY_DECIMALS,
    round_to, round_for_display, approx_eq,
};
pub use error::CoreError;
