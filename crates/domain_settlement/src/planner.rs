//! Settlement planning
//!
//! Turns a balance table into an ordered list of peer-to-peer transfers that
//! brings every balance to zero. The greedy strategy always lets the
//! participant who owes the most pay the participant who is owed the most;
//! every transfer clears at least one of the two, so `N` participants settle
//! in at most `N - 1` transfers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};

use core_kernel::{round_for_display, ParticipantId, SETTLEMENT_TOLERANCE};

use crate::balance::Balances;
use crate::error::SettlementError;

/// A single transfer from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Participant who pays
    pub debtor: ParticipantId,
    /// Participant who receives
    pub creditor: ParticipantId,
    /// Exact amount, never rounded
    pub amount: f64,
}

impl Transaction {
    /// Creates a new transaction
    pub fn new(debtor: ParticipantId, creditor: ParticipantId, amount: f64) -> Self {
        Self { debtor, creditor, amount }
    }

    /// Amount rounded to display precision
    pub fn display_amount(&self) -> f64 {
        round_for_display(self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \u{2bc8} {:.2} \u{2bc8} {}", self.debtor, self.display_amount(), self.creditor)
    }
}

/// Plans the transfers that settle a balance table
///
/// # Example
///
/// ```rust
/// use domain_settlement::{Balances, SettlementPlanner};
/// use core_kernel::ParticipantId;
///
/// let balances: Balances = [
///     (ParticipantId::new("A"), 50.0),
///     (ParticipantId::new("B"), -50.0),
/// ].into_iter().collect();
///
/// let flow = SettlementPlanner::default().calculate_flow(&balances).unwrap();
/// assert_eq!(flow.len(), 1);
/// assert_eq!(flow[0].to_string(), "B \u{2bc8} 50.00 \u{2bc8} A");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SettlementPlanner {
    tolerance: f64,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self {
            tolerance: SETTLEMENT_TOLERANCE,
        }
    }
}

impl SettlementPlanner {
    /// Creates a planner with the default tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerance below which a balance counts as settled
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// The settlement tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Calculates the transfers that bring all balances to zero
    ///
    /// While some balance exceeds the tolerance, the participant with the
    /// lowest balance pays the participant with the highest one the smaller
    /// of the two magnitudes. Ties go to the participant that comes first in
    /// the balance order. Amounts are kept exact; round them only for display.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::Convergence`] when no participant is left to
    /// pay an outstanding credit, when more transfers than participants would
    /// be needed, or when the balances left over add up to a debt beyond the
    /// tolerance. All of these mean the balances did not sum to zero.
    ///
    /// Debtors may be left slightly below `-tolerance` when several creditors
    /// each sit within the tolerance; such a table is still balanced.
    pub fn calculate_flow(&self, balances: &Balances) -> Result<Vec<Transaction>, SettlementError> {
        let participants: Vec<&ParticipantId> = balances.participants().collect();
        let mut working: Vec<f64> = balances.iter().map(|(_, b)| b).collect();
        let cap = working.len();
        let mut flow = Vec::new();

        while let Some((creditor, credit)) = extreme(&working, Ordering::Greater) {
            if credit <= self.tolerance {
                break;
            }

            let (debtor, debt) = match extreme(&working, Ordering::Less) {
                Some((index, value)) if value < 0.0 => (index, value),
                _ => return Err(self.stalled(flow.len(), credit)),
            };
            if flow.len() >= cap {
                return Err(self.stalled(flow.len(), credit));
            }

            let amount = debt.abs().min(credit.abs());
            working[debtor] += amount;
            working[creditor] -= amount;

            debug!(
                debtor = %participants[debtor],
                creditor = %participants[creditor],
                amount,
                "Planned settlement transfer"
            );
            flow.push(Transaction::new(
                participants[debtor].clone(),
                participants[creditor].clone(),
                amount,
            ));
        }

        let residual: f64 = working.iter().sum();
        if residual < -self.tolerance {
            return Err(self.stalled(flow.len(), residual));
        }

        Ok(flow)
    }

    fn stalled(&self, iterations: usize, residual: f64) -> SettlementError {
        warn!(iterations, residual, "Settlement did not converge");
        SettlementError::Convergence { iterations, residual }
    }
}

/// Index and value of the first extreme element in the given direction
fn extreme(values: &[f64], direction: Ordering) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value.partial_cmp(&current) != Some(direction) => {}
            _ => best = Some((index, value)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    fn balances(values: &[(&str, f64)]) -> Balances {
        values.iter().map(|(p, b)| (id(p), *b)).collect()
    }

    #[test]
    fn test_extreme_prefers_first_on_ties() {
        assert_eq!(extreme(&[1.0, 3.0, 3.0], Ordering::Greater), Some((1, 3.0)));
        assert_eq!(extreme(&[-2.0, 0.0, -2.0], Ordering::Less), Some((0, -2.0)));
        assert_eq!(extreme(&[], Ordering::Less), None);
    }

    #[test]
    fn test_single_transfer() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 50.0), ("B", -50.0)]))
            .unwrap();

        assert_eq!(flow, vec![Transaction::new(id("B"), id("A"), 50.0)]);
    }

    #[test]
    fn test_settled_balances_need_no_transfer() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 0.0), ("B", 0.0), ("C", 0.0)]))
            .unwrap();

        assert!(flow.is_empty());
    }

    #[test]
    fn test_empty_balances() {
        let flow = SettlementPlanner::default().calculate_flow(&Balances::new()).unwrap();
        assert!(flow.is_empty());
    }

    #[test]
    fn test_largest_debtor_pays_largest_creditor_first() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 30.0), ("B", -10.0), ("C", -20.0)]))
            .unwrap();

        assert_eq!(
            flow,
            vec![
                Transaction::new(id("C"), id("A"), 20.0),
                Transaction::new(id("B"), id("A"), 10.0),
            ]
        );
    }

    #[test]
    fn test_ties_break_by_order() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", -5.0), ("B", 5.0), ("C", -5.0), ("D", 5.0)]))
            .unwrap();

        assert_eq!(
            flow,
            vec![
                Transaction::new(id("A"), id("B"), 5.0),
                Transaction::new(id("C"), id("D"), 5.0),
            ]
        );
    }

    #[test]
    fn test_positive_drift_is_convergence_error() {
        let result = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 1.0), ("B", 0.0)]));

        assert_eq!(result, Err(SettlementError::Convergence { iterations: 0, residual: 1.0 }));
    }

    #[test]
    fn test_creditors_within_tolerance_leave_debtor_as_is() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 9e-7), ("B", 9e-7), ("C", -1.8e-6)]))
            .unwrap();

        assert!(flow.is_empty());
    }

    #[test]
    fn test_negative_residue_is_convergence_error() {
        let result = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 1.0), ("B", -1.5)]));

        assert!(matches!(
            result,
            Err(SettlementError::Convergence { iterations: 1, residual }) if (residual + 0.5).abs() < 1e-12
        ));
    }

    #[test]
    fn test_residue_within_tolerance_is_accepted() {
        let flow = SettlementPlanner::default()
            .calculate_flow(&balances(&[("A", 10.0), ("B", -10.0000001)]))
            .unwrap();

        assert_eq!(flow.len(), 1);
        assert_eq!(flow[0].amount, 10.0);
    }

    #[test]
    fn test_custom_tolerance() {
        let planner = SettlementPlanner::new().with_tolerance(0.01);
        let flow = planner
            .calculate_flow(&balances(&[("A", 0.005), ("B", -0.005)]))
            .unwrap();

        assert!(flow.is_empty());
        assert_eq!(planner.tolerance(), 0.01);
    }

    #[test]
    fn test_display_rounds_amount() {
        let transaction = Transaction::new(id("B"), id("A"), 33.333333);
        assert_eq!(transaction.display_amount(), 33.33);
        assert_eq!(transaction.to_string(), "B \u{2bc8} 33.33 \u{2bc8} A");
    }
}
