//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledgers and balance
//! tables that maintain the domain invariants.

use core_kernel::ParticipantId;
use domain_ledger::{Bill, BillEntry, Ledger};
use domain_settlement::Balances;
use proptest::prelude::*;

/// Strategy for a payment amount with cent precision (0.00 to 2000.00)
pub fn payment_strategy() -> impl Strategy<Value = f64> {
    (0u32..200_000u32).prop_map(|cents| cents as f64 / 100.0)
}

/// Strategy for share weights of `n` participants, at least one non-zero
///
/// Weights are whole numbers so that dividing by their sum yields shares
/// that add up to one within round-off.
pub fn share_weights_strategy(n: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..100u32, n).prop_map(|mut weights| {
        if weights.iter().all(|w| *w == 0) {
            if let Some(first) = weights.first_mut() {
                *first = 1;
            }
        }
        weights
    })
}

/// Strategy for `1..=max` unique participant ids
pub fn participants_strategy(max: usize) -> impl Strategy<Value = Vec<ParticipantId>> {
    prop::collection::hash_set("[A-Z][a-z]{1,6}", 1..=max)
        .prop_map(|names| names.into_iter().map(ParticipantId::new).collect())
}

/// Strategy for a bill covering exactly `participants`
pub fn bill_strategy(id: String, participants: Vec<ParticipantId>) -> impl Strategy<Value = Bill> {
    let n = participants.len();
    (prop::collection::vec(payment_strategy(), n), share_weights_strategy(n)).prop_map(
        move |(payments, weights)| {
            let weight_sum: u32 = weights.iter().sum();
            let entries = participants
                .iter()
                .cloned()
                .zip(payments.into_iter().zip(weights))
                .map(|(p, (payment, weight))| {
                    (p, BillEntry::new(payment, weight as f64 / weight_sum as f64))
                });
            Bill::new(id.clone(), entries)
        },
    )
}

/// Strategy for valid ledgers with up to `max_participants` people and `max_bills` bills
pub fn ledger_strategy(max_participants: usize, max_bills: usize) -> impl Strategy<Value = Ledger> {
    (participants_strategy(max_participants), 0..=max_bills)
        .prop_flat_map(|(participants, bill_count)| {
            let bills: Vec<_> = (0..bill_count)
                .map(|i| bill_strategy(format!("bill_{}", i), participants.clone()))
                .collect();
            (Just(participants), bills)
        })
        .prop_map(|(participants, bills)| {
            Ledger::new("generated", "work_dir", participants, bills)
                .expect("generated ledger must be valid")
        })
}

/// Strategy for valid ledgers of a small group
pub fn valid_ledger_strategy() -> impl Strategy<Value = Ledger> {
    ledger_strategy(6, 10)
}

/// Strategy for balance tables that sum to zero up to round-off
pub fn zero_sum_balances_strategy(max_participants: usize) -> impl Strategy<Value = Balances> {
    prop::collection::vec(-100_000i64..100_000i64, 1..max_participants.max(2)).prop_map(|cents| {
        let last = -cents.iter().sum::<i64>();
        cents
            .into_iter()
            .chain(std::iter::once(last))
            .enumerate()
            .map(|(i, c)| (ParticipantId::new(format!("p{}", i)), c as f64 / 100.0))
            .collect()
    })
}
