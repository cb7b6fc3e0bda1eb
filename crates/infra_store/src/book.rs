//! CSV bill books
//!
//! Books are comma separated with `|` as the quote character. The ledger is
//! named after the file stem and its workspace is the file's directory.

use std::path::Path;

use csv::ReaderBuilder;
use domain_ledger::{ledger_from_rows, Ledger};
use tracing::info;

use crate::error::StoreError;

/// Quote character used by bill books
pub const BOOK_QUOTE: u8 = b'|';

/// Reads a CSV bill book into a ledger
///
/// # Errors
///
/// - [`StoreError::Csv`] if the file cannot be opened or decoded
/// - [`StoreError::UnnamedPath`] if the path has no file stem
/// - [`StoreError::Ledger`] if the rows do not form a valid ledger
pub fn read_book(path: impl AsRef<Path>) -> Result<Ledger, StoreError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::UnnamedPath(path.to_path_buf()))?;
    let workspace = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quote(BOOK_QUOTE)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_owned).collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::csv(path, e))?;

    let ledger = ledger_from_rows(name, workspace, &rows)?;
    info!(
        path = %path.display(),
        participants = ledger.participants().len(),
        bills = ledger.len(),
        "Imported bill book"
    );
    Ok(ledger)
}
