//! Pre-built Test Fixtures
//!
//! Provides ready-to-use ledgers for the scenarios the test suites keep
//! coming back to. Fixtures are deterministic.

use core_kernel::ParticipantId;
use domain_ledger::{Bill, BillEntry, Ledger};

/// Fixture for participant lists
pub struct ParticipantFixtures;

impl ParticipantFixtures {
    /// `["A", "B", "C"]`
    pub fn abc() -> Vec<ParticipantId> {
        Self::named(&["A", "B", "C"])
    }

    /// `["A", "B"]`
    pub fn ab() -> Vec<ParticipantId> {
        Self::named(&["A", "B"])
    }

    /// Participants with the given names, in order
    pub fn named(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::new(*n)).collect()
    }
}

/// Fixture for ledger test data
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// Three participants and three bills that cancel out exactly
    ///
    /// - `first_bill`: A 10, B 20, C 30, equal shares
    /// - `second_bill`: A 5, B 4, C 3, equal shares
    /// - `third_bill`: A pays 9 entirely on behalf of C
    pub fn reference() -> Ledger {
        let third = 1.0 / 3.0;
        Ledger::new(
            "test",
            "work_dir",
            ParticipantFixtures::abc(),
            vec![
                bill("first_bill", &[("A", 10.0, third), ("B", 20.0, third), ("C", 30.0, third)]),
                bill("second_bill", &[("A", 5.0, third), ("B", 4.0, third), ("C", 3.0, third)]),
                bill("third_bill", &[("A", 9.0, 0.0), ("B", 0.0, 0.0), ("C", 0.0, 1.0)]),
            ],
        )
        .expect("reference ledger is valid")
    }

    /// A pays 100 for a dinner split in half with B
    pub fn dinner_for_two() -> Ledger {
        Ledger::new(
            "dinner",
            "work_dir",
            ParticipantFixtures::ab(),
            vec![bill("dinner", &[("A", 100.0, 0.5), ("B", 0.0, 0.5)])],
        )
        .expect("dinner ledger is valid")
    }

    /// Four flatmates with uneven rent shares and a shared grocery run
    pub fn flatshare() -> Ledger {
        Ledger::new(
            "flat",
            "work_dir",
            ParticipantFixtures::named(&["Ana", "Ben", "Cleo", "Dev"]),
            vec![
                bill("rent", &[("Ana", 1200.0, 0.4), ("Ben", 0.0, 0.2), ("Cleo", 0.0, 0.2), ("Dev", 0.0, 0.2)]),
                bill("groceries", &[("Ana", 0.0, 0.25), ("Ben", 80.0, 0.25), ("Cleo", 40.0, 0.25), ("Dev", 0.0, 0.25)]),
            ],
        )
        .expect("flatshare ledger is valid")
    }

    /// A ledger with participants but no bills
    pub fn empty() -> Ledger {
        Ledger::empty("empty", "work_dir", ParticipantFixtures::abc()).expect("empty ledger is valid")
    }
}

fn bill(id: &str, rows: &[(&str, f64, f64)]) -> Bill {
    Bill::new(
        id,
        rows.iter()
            .map(|(p, payment, share)| (ParticipantId::new(*p), BillEntry::new(*payment, *share))),
    )
}
