//! Settlement domain errors

use thiserror::Error;

use core_kernel::ParticipantId;

/// Errors that can occur while settling balances
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    /// Balances could not be driven to zero within the iteration cap
    ///
    /// `residual` is the balance that was still outstanding when planning stopped.
    #[error("Settlement did not converge after {iterations} transactions (residual balance {residual})")]
    Convergence { iterations: usize, residual: f64 },

    /// A transaction names a participant the balances do not know
    #[error("Unknown participant in transaction: {0}")]
    UnknownParticipant(ParticipantId),
}
