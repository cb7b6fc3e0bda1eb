//! Ledger documents on disk
//!
//! A ledger is stored as a single JSON document at `<workspace>/<name>.json`.
//! Relative workspaces resolve against the store root.

use std::fs;
use std::path::{Path, PathBuf};

use domain_ledger::Ledger;
use tracing::{debug, info};

use crate::error::StoreError;

/// Extension of persisted ledger documents
pub const LEDGER_EXTENSION: &str = "json";

/// Reads and writes ledger documents
///
/// # Example
///
/// ```rust,no_run
/// use infra_store::LedgerStore;
///
/// let store = LedgerStore::new("/var/lib/settle");
/// let ledger = store.load("/var/lib/settle/trip/trip.json")?;
/// let path = store.save(&ledger)?;
/// # Ok::<(), infra_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LedgerStore {
    root: PathBuf,
    pretty: bool,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LedgerStore {
    /// Creates a store resolving relative workspaces against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    /// Writes compact JSON instead of indented JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Directory relative workspaces resolve against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the ledger is saved to
    pub fn path_for(&self, ledger: &Ledger) -> PathBuf {
        self.root
            .join(ledger.workspace())
            .join(format!("{}.{}", ledger.name(), LEDGER_EXTENSION))
    }

    /// Saves the ledger, creating its workspace directory if missing
    ///
    /// # Returns
    ///
    /// The path of the written document
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or file cannot be written
    pub fn save(&self, ledger: &Ledger) -> Result<PathBuf, StoreError> {
        let path = self.path_for(ledger);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let document = if self.pretty {
            ledger.serialize_pretty()?
        } else {
            ledger.serialize()?
        };
        fs::write(&path, document).map_err(|e| StoreError::io(&path, e))?;

        info!(
            path = %path.display(),
            bills = ledger.len(),
            "Saved ledger"
        );
        Ok(path)
    }

    /// Loads a ledger document
    ///
    /// Relative paths resolve against the store root.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file cannot be read
    /// - [`StoreError::Ledger`] if the document is malformed or invalid
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Ledger, StoreError> {
        let path = self.root.join(path.as_ref());
        debug!(path = %path.display(), "Loading ledger");

        let raw = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let ledger = Ledger::deserialize(&raw)?;

        info!(
            path = %path.display(),
            name = ledger.name(),
            bills = ledger.len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ParticipantId;

    fn ledger(workspace: &str) -> Ledger {
        Ledger::empty("trip", workspace, vec![ParticipantId::new("A")]).unwrap()
    }

    #[test]
    fn test_path_for_joins_workspace_and_name() {
        let store = LedgerStore::new("/data");
        assert_eq!(store.path_for(&ledger("work_dir")), PathBuf::from("/data/work_dir/trip.json"));
    }

    #[test]
    fn test_absolute_workspace_ignores_root() {
        let store = LedgerStore::new("/data");
        assert_eq!(store.path_for(&ledger("/srv/ledgers")), PathBuf::from("/srv/ledgers/trip.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LedgerStore::new("/nonexistent-settle-root")
            .load("missing.json")
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
