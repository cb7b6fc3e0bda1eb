//! Participant balances
//!
//! A balance is a participant's net position across all bills of a ledger:
//! positive when the group owes them money, negative when they owe the group.

use std::fmt;

use core_kernel::ParticipantId;
use domain_ledger::Ledger;

use crate::error::SettlementError;
use crate::planner::Transaction;

/// Net balance per participant, in ledger participant order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Balances {
    entries: Vec<(ParticipantId, f64)>,
}

impl Balances {
    /// Creates an empty balance table
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of a participant
    pub fn get(&self, participant: &ParticipantId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p == participant)
            .map(|(_, balance)| *balance)
    }

    /// Iterates over participants and balances in order
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, f64)> + '_ {
        self.entries.iter().map(|(p, balance)| (p, *balance))
    }

    /// Participants in order
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.entries.iter().map(|(p, _)| p)
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no participants
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; zero up to round-off for a valid ledger
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, balance)| balance).sum()
    }

    /// Largest balance
    pub fn max(&self) -> Option<f64> {
        self.entries.iter().map(|(_, b)| *b).reduce(f64::max)
    }

    /// Smallest balance
    pub fn min(&self) -> Option<f64> {
        self.entries.iter().map(|(_, b)| *b).reduce(f64::min)
    }

    /// Returns true when every balance is within `tolerance` of zero
    pub fn is_settled(&self, tolerance: f64) -> bool {
        self.entries.iter().all(|(_, b)| b.abs() <= tolerance)
    }

    /// Applies transactions and returns the resulting balances
    ///
    /// Each transaction moves its debtor up and its creditor down by the
    /// transaction amount.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::UnknownParticipant`] if a transaction names
    /// a participant that has no balance.
    pub fn apply(&self, transactions: &[Transaction]) -> Result<Balances, SettlementError> {
        let mut next = self.clone();
        for transaction in transactions {
            *next.slot(&transaction.debtor)? += transaction.amount;
            *next.slot(&transaction.creditor)? -= transaction.amount;
        }
        Ok(next)
    }

    fn slot(&mut self, participant: &ParticipantId) -> Result<&mut f64, SettlementError> {
        self.entries
            .iter_mut()
            .find(|(p, _)| p == participant)
            .map(|(_, balance)| balance)
            .ok_or_else(|| SettlementError::UnknownParticipant(participant.clone()))
    }
}

/// Collects balances; repeated participants keep their first position and
/// have their amounts added together
impl FromIterator<(ParticipantId, f64)> for Balances {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, f64)>>(iter: I) -> Self {
        let mut balances = Balances::new();
        for (participant, amount) in iter {
            match balances.entries.iter_mut().find(|(p, _)| *p == participant) {
                Some((_, balance)) => *balance += amount,
                None => balances.entries.push((participant, amount)),
            }
        }
        balances
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (participant, balance) in &self.entries {
            writeln!(f, "{}: {:.2}", participant, core_kernel::round_for_display(*balance))?;
        }
        Ok(())
    }
}

/// Derives participant balances from a ledger
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculates every participant's balance over all bills
    ///
    /// For each bill the total is the sum of payments; a participant's
    /// contribution is `payment - share * total`. The ledger is assumed to be
    /// valid and is not re-validated.
    pub fn calculate_balance(&self, ledger: &Ledger) -> Balances {
        let mut entries: Vec<(ParticipantId, f64)> = ledger
            .participants()
            .iter()
            .map(|p| (p.clone(), 0.0))
            .collect();

        for bill in ledger.bills() {
            let total: f64 = ledger
                .participants()
                .iter()
                .filter_map(|p| bill.entry(p))
                .map(|e| e.payment)
                .sum();

            for (participant, balance) in entries.iter_mut() {
                if let Some(entry) = bill.entry(participant) {
                    *balance += entry.contribution(total);
                }
            }
        }

        Balances { entries }
    }
}
