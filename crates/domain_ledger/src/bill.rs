//! Bills and their per-participant entries
//!
//! A bill records, for every participant of the ledger, how much they paid
//! toward it and which fraction of its total cost they are responsible for.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use core_kernel::{BillId, ParticipantId, SHARE_TOLERANCE};
use crate::error::ValidationError;

/// Payment and share of one participant in one bill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillEntry {
    /// Amount actually paid toward the bill
    pub payment: f64,
    /// Fraction of the bill's total the participant owes (0..=1)
    pub share: f64,
}

impl BillEntry {
    /// Creates a new entry from a payment and a fractional share
    pub fn new(payment: f64, share: f64) -> Self {
        Self { payment, share }
    }

    /// Creates an entry from a share expressed as a percentage (0-100)
    pub fn from_percentage(payment: f64, percent: f64) -> Self {
        Self::new(payment, percent / 100.0)
    }

    /// Contribution of this entry to the participant's balance, given the bill total
    ///
    /// Positive when the participant paid more than their share of `total`.
    pub fn contribution(&self, total: f64) -> f64 {
        self.payment - self.share * total
    }
}

/// Per-participant entries of a single bill
pub type BillEntries = BTreeMap<ParticipantId, BillEntry>;

/// Builds entries where every payer owes the same fraction of the total
///
/// # Example
///
/// ```rust
/// use domain_ledger::bill::equal_split;
/// use core_kernel::ParticipantId;
///
/// let entries = equal_split([
///     (ParticipantId::new("A"), 30.0),
///     (ParticipantId::new("B"), 0.0),
/// ]);
/// assert_eq!(entries[&ParticipantId::new("B")].share, 0.5);
/// ```
pub fn equal_split(payments: impl IntoIterator<Item = (ParticipantId, f64)>) -> BillEntries {
    let payments: Vec<(ParticipantId, f64)> = payments.into_iter().collect();
    let share = if payments.is_empty() {
        0.0
    } else {
        1.0 / payments.len() as f64
    };

    payments
        .into_iter()
        .map(|(participant, payment)| (participant, BillEntry::new(payment, share)))
        .collect()
}

/// A shared expense with one entry per ledger participant
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    /// Identifier, unique within a ledger
    pub id: BillId,
    /// Entries keyed by participant
    pub entries: BillEntries,
}

impl Bill {
    /// Creates a new bill
    pub fn new(id: impl Into<BillId>, entries: impl IntoIterator<Item = (ParticipantId, BillEntry)>) -> Self {
        Self {
            id: id.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the entry of a participant
    pub fn entry(&self, participant: &ParticipantId) -> Option<&BillEntry> {
        self.entries.get(participant)
    }

    /// Sum of all payments made toward the bill
    pub fn total(&self) -> f64 {
        self.entries.values().map(|e| e.payment).sum()
    }

    /// Sum of all shares of the bill
    pub fn total_share(&self) -> f64 {
        self.entries.values().map(|e| e.share).sum()
    }

    /// Validates the bill against the participant set of a ledger
    ///
    /// # Errors
    ///
    /// - the bill id is empty
    /// - the entries miss a participant or name one the ledger does not know
    /// - a payment or share is not finite, or a share is negative
    /// - the shares do not sum to 1.0 within [`SHARE_TOLERANCE`]
    pub fn validate(&self, participants: &[ParticipantId]) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyIdentifier(BillId::label()));
        }

        let expected: BTreeSet<&ParticipantId> = participants.iter().collect();
        let missing: Vec<ParticipantId> = participants
            .iter()
            .filter(|p| !self.entries.contains_key(*p))
            .cloned()
            .collect();
        let unexpected: Vec<ParticipantId> = self
            .entries
            .keys()
            .filter(|p| !expected.contains(p))
            .cloned()
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(ValidationError::ParticipantMismatch {
                bill: self.id.clone(),
                missing,
                unexpected,
            });
        }

        for (participant, entry) in &self.entries {
            let non_finite = if !entry.payment.is_finite() {
                Some("payment")
            } else if !entry.share.is_finite() {
                Some("share")
            } else {
                None
            };
            if let Some(field) = non_finite {
                return Err(ValidationError::NonFinite {
                    bill: self.id.clone(),
                    participant: participant.clone(),
                    field,
                });
            }

            if entry.share < 0.0 {
                return Err(ValidationError::NegativeShare {
                    bill: self.id.clone(),
                    participant: participant.clone(),
                    share: entry.share,
                });
            }
        }

        let total = self.total_share();
        if (total - 1.0).abs() >= SHARE_TOLERANCE {
            return Err(ValidationError::ShareSum {
                bill: self.id.clone(),
                total,
            });
        }

        Ok(())
    }
}
