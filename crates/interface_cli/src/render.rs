//! Text and JSON rendering of ledgers, balances and settlement flows
//!
//! Rendering never touches the values it prints: amounts are rounded for
//! presentation only.

use serde::Serialize;

use core_kernel::round_to;
use domain_ledger::Ledger;
use domain_settlement::{Balances, Transaction};

/// Width of a cell in the bill table
pub const CELL_WIDTH: usize = 12;

/// Arrow separating debtor, amount and creditor in a flow line
pub const FLOW_ARROW: char = '\u{2bc8}';

/// One line per transfer, `debtor ⯈ amount ⯈ creditor`
pub fn render_flow(flow: &[Transaction], precision: u32) -> String {
    flow.iter()
        .map(|t| {
            format!(
                "{} {arrow} {} {arrow} {}\n",
                t.debtor,
                amount(t.amount, precision),
                t.creditor,
                arrow = FLOW_ARROW
            )
        })
        .collect()
}

/// One `participant: balance` line per participant, in ledger order
pub fn render_balances(balances: &Balances, precision: u32) -> String {
    balances
        .iter()
        .map(|(participant, balance)| format!("{}: {}\n", participant, amount(balance, precision)))
        .collect()
}

/// Payment table with a header of participants and one row per bill
///
/// Cells are left aligned and padded to [`CELL_WIDTH`]; payments are shown
/// as recorded.
pub fn render_bills(ledger: &Ledger) -> String {
    let mut out = row(std::iter::once(String::new()).chain(
        ledger.participants().iter().map(|p| p.to_string()),
    ));

    for bill in ledger.bills() {
        let payments = ledger.participants().iter().map(|p| {
            bill.entry(p)
                .map(|e| e.payment.to_string())
                .unwrap_or_default()
        });
        out.push_str(&row(std::iter::once(bill.id.to_string()).chain(payments)));
    }
    out
}

fn row(cells: impl Iterator<Item = String>) -> String {
    let mut line: String = cells
        .map(|c| format!("{:<width$}", c, width = CELL_WIDTH))
        .collect();
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

fn amount(value: f64, precision: u32) -> String {
    format!("{:.*}", precision as usize, round_to(value, precision))
}

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    participant: &'a str,
    balance: f64,
}

/// Balances as a JSON array of `{participant, balance}` objects, unrounded
pub fn balances_json(balances: &Balances) -> Result<String, serde_json::Error> {
    let rows: Vec<BalanceRow<'_>> = balances
        .iter()
        .map(|(participant, balance)| BalanceRow {
            participant: participant.as_str(),
            balance,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Flow as a JSON array of transactions, unrounded
pub fn flow_json(flow: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(flow)
}
