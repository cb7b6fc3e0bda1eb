//! Ledger domain errors

use thiserror::Error;

use core_kernel::{BillId, ParticipantId};

/// A ledger or bill violates one of the ledger invariants
///
/// Raised when constructing a ledger or appending a bill. The value the
/// operation was applied to is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Shares of a bill do not add up to one
    #[error("Shares of bill '{bill}' must sum up to 1.0, got {total}")]
    ShareSum { bill: BillId, total: f64 },

    /// Bill entries do not cover exactly the ledger participants
    #[error(
        "Bill '{bill}' does not match the ledger participants (missing: [{}], unexpected: [{}])",
        join(.missing),
        join(.unexpected)
    )]
    ParticipantMismatch {
        bill: BillId,
        missing: Vec<ParticipantId>,
        unexpected: Vec<ParticipantId>,
    },

    /// A participant was assigned a negative share
    #[error("Negative share {share} for '{participant}' in bill '{bill}'")]
    NegativeShare {
        bill: BillId,
        participant: ParticipantId,
        share: f64,
    },

    /// A payment or share is NaN or infinite
    #[error("Non-finite {field} for '{participant}' in bill '{bill}'")]
    NonFinite {
        bill: BillId,
        participant: ParticipantId,
        field: &'static str,
    },

    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("Duplicate bill: {0}")]
    DuplicateBill(BillId),

    #[error("Empty {0} identifier")]
    EmptyIdentifier(&'static str),
}

/// Persisted or imported data has the wrong shape
#[derive(Debug, Error)]
pub enum FormatError {
    /// The JSON document is malformed or misses required fields
    #[error("Malformed ledger document: {0}")]
    Json(#[source] serde_json::Error),

    /// The tabular input has no header row
    #[error("Missing header row")]
    MissingHeader,

    /// A data row has a different number of cells than the header
    #[error("Row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell could not be parsed as a number
    #[error("Row {row}, column {column}: cannot parse '{value}' as a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    /// A payment row is not followed by its share row
    #[error("Row {row}: payments of bill '{bill}' have no matching share row")]
    DanglingPaymentRow { row: usize, bill: String },
}

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl LedgerError {
    /// Returns true for invariant violations
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    /// Returns true for malformed input
    pub fn is_format(&self) -> bool {
        matches!(self, LedgerError::Format(_))
    }
}

fn join(ids: &[ParticipantId]) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}
