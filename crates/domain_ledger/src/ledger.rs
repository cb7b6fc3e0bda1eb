//! The shared-expense ledger
//!
//! A ledger is a fixed, ordered list of participants plus the bills they
//! shared. It is an immutable value: appending a bill produces a new ledger,
//! so balances and settlements computed from one snapshot never go stale.

use std::collections::HashSet;
use tracing::debug;

use core_kernel::{BillId, ParticipantId};
use crate::bill::{Bill, BillEntries};
use crate::error::{LedgerError, ValidationError};
use crate::record::LedgerRecord;

/// The main ledger of participants and bills
///
/// # Invariants
///
/// - Participant ids are non-empty and unique; their order is significant
/// - Bill ids are non-empty and unique; bills keep insertion order
/// - Every bill has exactly one entry per participant
/// - Every bill's shares sum to 1.0 within `SHARE_TOLERANCE`
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    name: String,
    workspace: String,
    participants: Vec<ParticipantId>,
    bills: Vec<Bill>,
}

impl Ledger {
    /// Creates a validated ledger
    ///
    /// # Arguments
    ///
    /// * `name` - Project name, also used as the file stem when persisted
    /// * `workspace` - Workspace label (the directory the project lives in)
    /// * `participants` - Ordered, unique participant identifiers
    /// * `bills` - Bills in insertion order
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any invariant is violated
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_ledger::{Bill, BillEntry, Ledger};
    /// use core_kernel::ParticipantId;
    ///
    /// let ledger = Ledger::new(
    ///     "trip",
    ///     "work_dir",
    ///     vec![ParticipantId::new("A"), ParticipantId::new("B")],
    ///     vec![Bill::new("fuel", [
    ///         (ParticipantId::new("A"), BillEntry::new(100.0, 0.5)),
    ///         (ParticipantId::new("B"), BillEntry::new(0.0, 0.5)),
    ///     ])],
    /// ).unwrap();
    /// assert_eq!(ledger.len(), 1);
    /// ```
    pub fn new(
        name: impl Into<String>,
        workspace: impl Into<String>,
        participants: Vec<ParticipantId>,
        bills: Vec<Bill>,
    ) -> Result<Self, ValidationError> {
        validate_participants(&participants)?;

        let mut seen = HashSet::with_capacity(bills.len());
        for bill in &bills {
            if !seen.insert(&bill.id) {
                return Err(ValidationError::DuplicateBill(bill.id.clone()));
            }
            bill.validate(&participants)?;
        }

        Ok(Self {
            name: name.into(),
            workspace: workspace.into(),
            participants,
            bills,
        })
    }

    /// Creates a ledger with no bills
    pub fn empty(
        name: impl Into<String>,
        workspace: impl Into<String>,
        participants: Vec<ParticipantId>,
    ) -> Result<Self, ValidationError> {
        Self::new(name, workspace, participants, Vec::new())
    }

    /// Returns a new ledger with one more bill
    ///
    /// The bill is validated before acceptance. On failure `self` is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// - the bill id is already used in this ledger
    /// - the entries do not satisfy the bill invariants
    pub fn add_bill(
        &self,
        bill_id: impl Into<BillId>,
        entries: BillEntries,
    ) -> Result<Ledger, ValidationError> {
        self.append(Bill {
            id: bill_id.into(),
            entries,
        })
    }

    /// Returns a new ledger with `bill` appended
    pub fn append(&self, bill: Bill) -> Result<Ledger, ValidationError> {
        if self.bill(&bill.id).is_some() {
            return Err(ValidationError::DuplicateBill(bill.id));
        }
        bill.validate(&self.participants)?;

        debug!(
            ledger = %self.name,
            bill = %bill.id,
            total = bill.total(),
            "Appending bill"
        );

        let mut bills = Vec::with_capacity(self.bills.len() + 1);
        bills.extend(self.bills.iter().cloned());
        bills.push(bill);

        Ok(Ledger {
            name: self.name.clone(),
            workspace: self.workspace.clone(),
            participants: self.participants.clone(),
            bills,
        })
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workspace label
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Participants in ledger order
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    /// Bills in insertion order
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Looks up a bill by id
    pub fn bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| &b.id == id)
    }

    /// Number of bills
    pub fn len(&self) -> usize {
        self.bills.len()
    }

    /// Returns true when no bill has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Serializes the ledger to its persisted JSON document
    pub fn serialize(&self) -> Result<String, LedgerError> {
        LedgerRecord::from(self).to_json(false)
    }

    /// Serializes the ledger to an indented JSON document
    pub fn serialize_pretty(&self) -> Result<String, LedgerError> {
        LedgerRecord::from(self).to_json(true)
    }

    /// Parses and validates a persisted JSON document
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Format`] when fields are missing or mis-shaped
    /// - [`LedgerError::Validation`] when the document violates an invariant
    pub fn deserialize(raw: &str) -> Result<Ledger, LedgerError> {
        LedgerRecord::from_json(raw)?.into_ledger()
    }
}

fn validate_participants(participants: &[ParticipantId]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if participant.is_empty() {
            return Err(ValidationError::EmptyIdentifier(ParticipantId::label()));
        }
        if !seen.insert(participant) {
            return Err(ValidationError::DuplicateParticipant(participant.clone()));
        }
    }
    Ok(())
}
