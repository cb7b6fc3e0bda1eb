//! Infrastructure Store Layer
//!
//! File-system persistence for ledgers. Ledgers are saved as JSON documents
//! under their workspace directory, and bill books can be imported from CSV.
//!
//! # Example
//!
//! ```rust,no_run
//! use infra_store::{read_book, LedgerStore};
//!
//! let ledger = read_book("work_dir/test.csv")?;
//! let saved_to = LedgerStore::default().save(&ledger)?;
//! assert!(saved_to.ends_with("work_dir/test.json"));
//! # Ok::<(), infra_store::StoreError>(())
//! ```

pub mod book;
pub mod error;
pub mod store;

pub use book::read_book;
pub use error::StoreError;
pub use store::LedgerStore;
