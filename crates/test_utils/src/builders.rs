//! Test Data Builders
//!
//! Provides builder patterns for constructing ledgers with sensible defaults.
//! Tests specify only the bills they care about.

use core_kernel::{BillId, ParticipantId};
use domain_ledger::{Bill, BillEntry, Ledger, ValidationError};

use crate::fixtures::ParticipantFixtures;

/// Builder for a single bill
#[derive(Debug, Clone)]
pub struct TestBillBuilder {
    id: BillId,
    entries: Vec<(ParticipantId, BillEntry)>,
}

impl TestBillBuilder {
    /// Creates a builder for a bill with the given id and no entries
    pub fn new(id: impl Into<BillId>) -> Self {
        Self {
            id: id.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry with a fractional share
    pub fn entry(mut self, participant: &str, payment: f64, share: f64) -> Self {
        self.entries.push((ParticipantId::new(participant), BillEntry::new(payment, share)));
        self
    }

    /// Adds one payment per participant and splits the bill equally
    pub fn split_equally(mut self, payments: &[(&str, f64)]) -> Self {
        let share = 1.0 / payments.len() as f64;
        for (participant, payment) in payments {
            self.entries.push((ParticipantId::new(*participant), BillEntry::new(*payment, share)));
        }
        self
    }

    /// Builds the bill
    pub fn build(self) -> Bill {
        Bill::new(self.id, self.entries)
    }
}

/// Builder for ledgers
#[derive(Debug, Clone)]
pub struct TestLedgerBuilder {
    name: String,
    workspace: String,
    participants: Vec<ParticipantId>,
    bills: Vec<Bill>,
}

impl Default for TestLedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedgerBuilder {
    /// Creates a builder for the `A, B, C` group with no bills
    pub fn new() -> Self {
        Self {
            name: "test".to_string(),
            workspace: "work_dir".to_string(),
            participants: ParticipantFixtures::abc(),
            bills: Vec::new(),
        }
    }

    /// Sets the project name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the workspace label
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = workspace.into();
        self
    }

    /// Replaces the participant list
    pub fn with_participants(mut self, names: &[&str]) -> Self {
        self.participants = ParticipantFixtures::named(names);
        self
    }

    /// Appends a bill
    pub fn with_bill(mut self, bill: TestBillBuilder) -> Self {
        self.bills.push(bill.build());
        self
    }

    /// Appends a bill split equally between all payers listed
    pub fn with_equal_bill(self, id: &str, payments: &[(&str, f64)]) -> Self {
        self.with_bill(TestBillBuilder::new(id).split_equally(payments))
    }

    /// Builds the ledger, reporting validation failures
    pub fn try_build(self) -> Result<Ledger, ValidationError> {
        Ledger::new(self.name, self.workspace, self.participants, self.bills)
    }

    /// Builds the ledger
    ///
    /// # Panics
    ///
    /// Panics if the configured bills are invalid
    pub fn build(self) -> Ledger {
        self.try_build().expect("test ledger must be valid")
    }
}
