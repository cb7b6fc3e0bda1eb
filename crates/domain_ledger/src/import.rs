//! Conversion of tabular bill books into ledgers
//!
//! A book is a grid of cells. The first row is a header whose first cell is
//! ignored and whose remaining cells name the participants. Every bill then
//! takes two rows: the first carries the bill id and each participant's
//! payment, the second each participant's share as a percentage (0-100).
//!
//! ```text
//!             ,A   ,B   ,C
//! first_bill  ,10  ,20  ,30
//!             ,50  ,25  ,25
//! ```
//!
//! Reading the grid from a file is left to the caller.

use core_kernel::ParticipantId;
use crate::bill::{Bill, BillEntry};
use crate::error::{FormatError, LedgerError};
use crate::ledger::Ledger;

/// Builds a ledger from the rows of a bill book
///
/// Rows made only of empty cells are skipped. Row and column numbers in
/// errors are 1-based positions in `rows`.
///
/// # Errors
///
/// - [`FormatError`] when the grid is ragged, a number cannot be parsed,
///   the header is missing or a payment row has no share row
/// - [`crate::ValidationError`] when the resulting bills break a ledger invariant
pub fn ledger_from_rows<R, C>(
    name: impl Into<String>,
    workspace: impl Into<String>,
    rows: &[R],
) -> Result<Ledger, LedgerError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut numbered = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i + 1, row.as_ref()))
        .filter(|(_, cells)| cells.iter().any(|c| !c.as_ref().trim().is_empty()));

    let (_, header) = numbered.next().ok_or(FormatError::MissingHeader)?;
    let participants: Vec<ParticipantId> = header
        .iter()
        .skip(1)
        .map(|c| ParticipantId::new(c.as_ref().trim()))
        .collect();
    let width = header.len();

    let mut bills = Vec::new();
    while let Some((payment_row, payments)) = numbered.next() {
        check_width(payment_row, payments, width)?;
        let bill_id = payments[0].as_ref().trim().to_string();

        let (share_row, shares) = numbered.next().ok_or_else(|| FormatError::DanglingPaymentRow {
            row: payment_row,
            bill: bill_id.clone(),
        })?;
        check_width(share_row, shares, width)?;

        let mut entries = Vec::with_capacity(participants.len());
        for (column, participant) in participants.iter().enumerate() {
            let payment = parse_cell(payment_row, column + 2, payments[column + 1].as_ref())?;
            let percent = parse_cell(share_row, column + 2, shares[column + 1].as_ref())?;
            entries.push((participant.clone(), BillEntry::from_percentage(payment, percent)));
        }

        bills.push(Bill::new(bill_id, entries));
    }

    Ok(Ledger::new(name, workspace, participants, bills)?)
}

fn check_width<C: AsRef<str>>(row: usize, cells: &[C], width: usize) -> Result<(), FormatError> {
    if cells.len() != width {
        return Err(FormatError::RaggedRow {
            row,
            expected: width,
            found: cells.len(),
        });
    }
    Ok(())
}

fn parse_cell(row: usize, column: usize, raw: &str) -> Result<f64, FormatError> {
    raw.trim().parse::<f64>().map_err(|_| FormatError::InvalidNumber {
        row,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_two_bills() {
        let rows = grid(&[
            &["", "A", "B"],
            &["lunch", "20", "0"],
            &["", "50", "50"],
            &["taxi", "0", "8.5"],
            &["", "100", "0"],
        ]);

        let ledger = ledger_from_rows("trip", "work_dir", &rows).unwrap();

        assert_eq!(ledger.participants(), &[ParticipantId::new("A"), ParticipantId::new("B")]);
        assert_eq!(ledger.len(), 2);
        let taxi = &ledger.bills()[1];
        assert_eq!(taxi.entry(&ParticipantId::new("A")), Some(&BillEntry::new(0.0, 1.0)));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = grid(&[&["", "A"], &["", ""], &["solo", "5"], &["", "100"]]);
        let ledger = ledger_from_rows("p", "w", &rows).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_missing_header() {
        let rows: Vec<Vec<String>> = Vec::new();
        let result = ledger_from_rows("p", "w", &rows);
        assert!(matches!(result, Err(LedgerError::Format(FormatError::MissingHeader))));
    }

    #[test]
    fn test_unparsable_number() {
        let rows = grid(&[&["", "A", "B"], &["lunch", "ten", "0"], &["", "50", "50"]]);
        let result = ledger_from_rows("p", "w", &rows);
        assert!(matches!(
            result,
            Err(LedgerError::Format(FormatError::InvalidNumber { row: 2, column: 2, .. }))
        ));
    }

    #[test]
    fn test_ragged_row() {
        let rows = grid(&[&["", "A", "B"], &["lunch", "1"], &["", "50", "50"]]);
        let result = ledger_from_rows("p", "w", &rows);
        assert!(matches!(
            result,
            Err(LedgerError::Format(FormatError::RaggedRow { row: 2, expected: 3, found: 2 }))
        ));
    }

    #[test]
    fn test_dangling_payment_row() {
        let rows = grid(&[&["", "A"], &["lunch", "1"]]);
        let result = ledger_from_rows("p", "w", &rows);
        assert!(matches!(result, Err(LedgerError::Format(FormatError::DanglingPaymentRow { .. }))));
    }

    #[test]
    fn test_percentages_must_total_hundred() {
        let rows = grid(&[&["", "A", "B"], &["lunch", "10", "0"], &["", "50", "40"]]);
        let result = ledger_from_rows("p", "w", &rows);
        assert!(matches!(
            result,
            Err(LedgerError::Validation(ValidationError::ShareSum { .. }))
        ));
    }
}
