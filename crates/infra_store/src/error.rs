//! Store error types
//!
//! Errors raised while reading or writing ledgers on disk. File-system
//! failures keep the path they happened on so callers can report it.

use std::io;
use std::path::{Path, PathBuf};

use domain_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV reader rejected the book
    #[error("Failed to read bill book '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The path has no usable file stem to name the ledger after
    #[error("Cannot derive a ledger name from '{0}'")]
    UnnamedPath(PathBuf),

    /// The document or book decoded but does not form a valid ledger
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    /// Creates an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a CSV error for the given path
    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Checks if the underlying file does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            StoreError::Csv { source, .. } => matches!(
                source.kind(),
                csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::NotFound
            ),
            _ => false,
        }
    }

    /// Checks if the data was readable but invalid
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, StoreError::Ledger(_) | StoreError::Csv { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_path() {
        let err = StoreError::io("work_dir/test.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("work_dir/test.json"));
        assert!(err.is_not_found());
        assert!(!err.is_invalid_data());
    }

    #[test]
    fn test_ledger_error_is_invalid_data() {
        let err: StoreError = LedgerError::from(domain_ledger::FormatError::MissingHeader).into();
        assert!(err.is_invalid_data());
        assert!(!err.is_not_found());
    }
}
