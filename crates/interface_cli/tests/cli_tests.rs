//! End-to-end tests for the settle command
//!
//! Commands are parsed and run in-process against a temporary root
//! directory, covering the path from bill entry to settlement output.

use std::fs;
use std::path::Path;

use clap::Parser;
use interface_cli::{run, Cli, CliConfig, CliError};
use infra_store::LedgerStore;
use test_utils::{assert_flow_settles, LedgerFixtures};

fn exec(root: &Path, args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec![
        "settle".to_string(),
        "--root".to_string(),
        root.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));

    let cli = Cli::try_parse_from(argv).expect("arguments must parse");
    let mut out = Vec::new();
    run(cli, &CliConfig::default(), &mut out)?;
    Ok(String::from_utf8(out).expect("output is UTF-8"))
}

const REFERENCE_BOOK: &str = "\
,A,B,C
first_bill,10,20,30
,33.333333333333333,33.333333333333333,33.333333333333334
second_bill,5,4,3
,33.333333333333333,33.333333333333333,33.333333333333334
third_bill,9,0,0
,0,0,100
";

// ============================================================================
// Project Workflow Tests
// ============================================================================

mod workflow_tests {
    use super::*;

    #[test]
    fn test_new_add_bill_and_settle() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let saved = exec(root, &["new", "--name", "trip", "--workspace", "w", "--user", "A", "--user", "B"]).unwrap();
        assert!(saved.starts_with("Saved trip to "));
        assert!(root.join("w").join("trip.json").exists());

        exec(root, &["--state", "w/trip.json", "add-bill", "--id", "dinner", "--payment", "A=100"]).unwrap();

        let flow = exec(root, &["--state", "w/trip.json", "flow"]).unwrap();
        assert_eq!(flow, "B \u{2bc8} 50.00 \u{2bc8} A\n");

        let balance = exec(root, &["--state", "w/trip.json", "balance"]).unwrap();
        assert_eq!(balance, "A: 50.00\nB: -50.00\n");
    }

    #[test]
    fn test_bills_table() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        exec(root, &["new", "--name", "trip", "--workspace", "w", "--user", "A", "--user", "B"]).unwrap();
        exec(root, &["--state", "w/trip.json", "add-bill", "--id", "dinner", "--payment", "A=100"]).unwrap();

        let table = exec(root, &["--state", "w/trip.json", "bills"]).unwrap();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], format!("{:12}{:<12}B", "", "A"));
        assert_eq!(lines[1], format!("{:<12}{:<12}0", "dinner", "100"));
    }

    #[test]
    fn test_percentage_bill() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        exec(root, &["new", "--name", "flat", "--user", "A", "--user", "B"]).unwrap();

        exec(root, &[
            "--state", "flat.json", "add-bill", "--id", "rent", "--payment", "B=1000",
            "--percent", "A=70", "--percent", "B=30",
        ])
        .unwrap();

        let flow = exec(root, &["--state", "flat.json", "flow"]).unwrap();
        assert_eq!(flow, "A \u{2bc8} 700.00 \u{2bc8} B\n");
    }

    #[test]
    fn test_percentages_must_add_up() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        exec(root, &["new", "--name", "flat", "--user", "A", "--user", "B"]).unwrap();

        let err = exec(root, &[
            "--state", "flat.json", "add-bill", "--id", "rent", "--percent", "A=70", "--percent", "B=20",
        ])
        .unwrap_err();

        match err {
            CliError::Ledger(inner) => assert!(inner.is_validation()),
            other => panic!("expected validation failure, got {:?}", other),
        }
        let ledger = LedgerStore::new(root).load("flat.json").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_stored_fixture_settles() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());
        store.save(&LedgerFixtures::flatshare()).unwrap();

        let flow = exec(dir.path(), &["--state", "work_dir/flat.json", "flow"]).unwrap();

        assert_eq!(
            flow,
            "Dev \u{2bc8} 270.00 \u{2bc8} Ana\n\
             Cleo \u{2bc8} 230.00 \u{2bc8} Ana\n\
             Ben \u{2bc8} 190.00 \u{2bc8} Ana\n"
        );
    }
}

// ============================================================================
// Bill Book Tests
// ============================================================================

mod book_tests {
    use super::*;

    #[test]
    fn test_reference_book_needs_no_transfers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test.csv"), REFERENCE_BOOK).unwrap();

        let flow = exec(dir.path(), &["--book", "test.csv", "flow"]).unwrap();
        assert_eq!(flow, "");

        let balance = exec(dir.path(), &["--book", "test.csv", "balance"]).unwrap();
        assert_eq!(balance, "A: 0.00\nB: 0.00\nC: 0.00\n");
    }

    #[test]
    fn test_import_saves_json_next_to_book() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test.csv"), REFERENCE_BOOK).unwrap();

        exec(dir.path(), &["--book", "test.csv", "import"]).unwrap();

        let saved = dir.path().join("test.json");
        assert!(saved.exists());
        let ledger = LedgerStore::default().load(&saved).unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.bills()[0].id.as_str(), "first_bill");
    }

    #[test]
    fn test_import_requires_book() {
        let dir = tempfile::tempdir().unwrap();
        LedgerStore::new(dir.path()).save(&LedgerFixtures::reference()).unwrap();

        let err = exec(dir.path(), &["--state", "work_dir/test.json", "import"]).unwrap_err();
        assert!(matches!(err, CliError::BookRequired));
        assert!(err.is_usage());
    }
}

// ============================================================================
// Output Option Tests
// ============================================================================

mod output_tests {
    use super::*;

    fn dinner_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        LedgerStore::new(dir.path()).save(&LedgerFixtures::dinner_for_two()).unwrap();
        dir
    }

    #[test]
    fn test_precision_flag() {
        let dir = dinner_root();
        let flow = exec(dir.path(), &["--state", "work_dir/dinner.json", "--precision", "3", "flow"]).unwrap();
        assert_eq!(flow, "B \u{2bc8} 50.000 \u{2bc8} A\n");
    }

    #[test]
    fn test_json_flow_settles_balances() {
        let dir = dinner_root();
        let raw = exec(dir.path(), &["--state", "work_dir/dinner.json", "--json", "flow"]).unwrap();

        let flow: Vec<domain_settlement::Transaction> = serde_json::from_str(&raw).unwrap();
        let balances = domain_settlement::BalanceCalculator
            .calculate_balance(&LedgerFixtures::dinner_for_two());
        assert_flow_settles(&balances, &flow);
    }

    #[test]
    fn test_json_balance() {
        let dir = dinner_root();
        let raw = exec(dir.path(), &["--state", "work_dir/dinner.json", "--json", "balance"]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["participant"], "A");
        assert_eq!(json[0]["balance"], 50.0);
        assert_eq!(json[1]["balance"], -50.0);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = exec(dir.path(), &["flow"]).unwrap_err();
        assert!(matches!(err, CliError::MissingSource));
    }

    #[test]
    fn test_missing_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = exec(dir.path(), &["--state", "nope.json", "flow"]).unwrap_err();
        match err {
            CliError::Store(inner) => assert!(inner.is_not_found()),
            other => panic!("expected store error, got {:?}", other),
        }
    }
}
