//! CLI error handling

use thiserror::Error;

use core_kernel::ParticipantId;
use domain_ledger::{LedgerError, ValidationError};
use domain_settlement::SettlementError;
use infra_store::StoreError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No ledger given: pass --state <json> or --book <csv>")]
    MissingSource,

    #[error("This command reads a CSV bill book: pass --book <csv>")]
    BookRequired,

    #[error("Invalid assignment '{0}', expected NAME=NUMBER")]
    InvalidAssignment(String),

    #[error("Unknown participant '{0}'")]
    UnknownParticipant(ParticipantId),

    #[error("Participant '{0}' is assigned more than once")]
    DuplicateAssignment(ParticipantId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Ledger(err.into())
    }
}

impl CliError {
    /// Checks if the error was caused by the command line itself
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            CliError::MissingSource
                | CliError::BookRequired
                | CliError::InvalidAssignment(_)
                | CliError::UnknownParticipant(_)
                | CliError::DuplicateAssignment(_)
        )
    }
}
