//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for balances and settlement flows
//! that give more meaningful error messages than standard assertions.

use core_kernel::{ParticipantId, SETTLEMENT_TOLERANCE};
use domain_settlement::{Balances, Transaction};

/// Asserts that a participant's balance is approximately `expected`
///
/// # Panics
///
/// Panics if the participant has no balance or it differs by more than `tolerance`
pub fn assert_balance_approx_eq(balances: &Balances, participant: &str, expected: f64, tolerance: f64) {
    let id = ParticipantId::new(participant);
    let actual = balances
        .get(&id)
        .unwrap_or_else(|| panic!("No balance for participant '{}'", participant));

    assert!(
        (actual - expected).abs() <= tolerance,
        "Balance of '{}' differs by more than tolerance: actual={}, expected={}, tolerance={}",
        participant,
        actual,
        expected,
        tolerance
    );
}

/// Asserts that balances sum to zero within the settlement tolerance
pub fn assert_zero_sum(balances: &Balances) {
    let total = balances.total();
    assert!(
        total.abs() <= SETTLEMENT_TOLERANCE,
        "Balances do not sum to zero: total={}, balances={:?}",
        total,
        balances
    );
}

/// Asserts that every balance is within the settlement tolerance of zero
pub fn assert_settled(balances: &Balances) {
    assert!(
        balances.is_settled(SETTLEMENT_TOLERANCE),
        "Balances are not settled: {:?}",
        balances
    );
}

/// Asserts that applying `flow` to `balances` settles everybody
///
/// Also checks that the flow uses fewer transfers than there are participants
/// and that every transfer moves a positive amount between two people.
pub fn assert_flow_settles(balances: &Balances, flow: &[Transaction]) {
    assert!(
        flow.len() < balances.len().max(1),
        "Flow uses {} transfers for {} participants",
        flow.len(),
        balances.len()
    );

    for transaction in flow {
        assert!(
            transaction.amount > 0.0,
            "Non-positive transfer amount: {:?}",
            transaction
        );
        assert_ne!(
            transaction.debtor, transaction.creditor,
            "Participant pays themselves: {:?}",
            transaction
        );
    }

    let after = balances
        .apply(flow)
        .expect("flow must only reference known participants");
    assert_settled(&after);
}
