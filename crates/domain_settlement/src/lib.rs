//! Settlement Domain - Balances and Settlement Planning
//!
//! This crate derives what each participant of a ledger is owed or owes, and
//! plans the transfers that square everybody up.
//!
//! # Flow
//!
//! ```text
//! Ledger -> BalanceCalculator -> Balances -> SettlementPlanner -> [Transaction]
//! ```
//!
//! Both steps are pure: the same ledger always yields the same balances and
//! the same ordered list of transfers.

pub mod balance;
pub mod planner;
pub mod error;

pub use balance::{Balances, BalanceCalculator};
pub use planner::{SettlementPlanner, Transaction};
pub use error::SettlementError;

use domain_ledger::Ledger;

/// Computes the balances of a ledger and plans their settlement
///
/// # Example
///
/// ```rust
/// use domain_ledger::{bill::equal_split, Ledger};
/// use domain_settlement::settle;
/// use core_kernel::ParticipantId;
///
/// let users = vec![ParticipantId::new("A"), ParticipantId::new("B")];
/// let ledger = Ledger::empty("p", "w", users.clone())
///     .unwrap()
///     .add_bill("dinner", equal_split(users.into_iter().zip([100.0, 0.0])))
///     .unwrap();
///
/// let flow = settle(&ledger).unwrap();
/// assert_eq!(flow[0].amount, 50.0);
/// ```
pub fn settle(ledger: &Ledger) -> Result<Vec<Transaction>, SettlementError> {
    let balances = BalanceCalculator.calculate_balance(ledger);
    SettlementPlanner::default().calculate_flow(&balances)
}
