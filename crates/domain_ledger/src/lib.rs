//! Ledger Domain - Participants, Bills and Share Validation
//!
//! This crate holds the validated data model of a shared-expense group:
//! an ordered list of participants and the bills they split.
//!
//! # Invariants
//!
//! Every bill covers exactly the ledger's participants, and its shares sum
//! to 1.0 within `core_kernel::SHARE_TOLERANCE`. This is what guarantees that
//! each bill's total cost is fully allocated, and in turn that balances sum
//! to zero.
//!
//! # Example
//!
//! ```rust
//! use domain_ledger::{bill::equal_split, Ledger};
//! use core_kernel::ParticipantId;
//!
//! let users = vec![ParticipantId::new("A"), ParticipantId::new("B")];
//! let ledger = Ledger::empty("trip", "work_dir", users.clone()).unwrap();
//!
//! let ledger = ledger
//!     .add_bill("fuel", equal_split(users.into_iter().zip([100.0, 0.0])))
//!     .unwrap();
//!
//! let restored = Ledger::deserialize(&ledger.serialize().unwrap()).unwrap();
//! assert_eq!(restored, ledger);
//! ```

pub mod bill;
pub mod ledger;
pub mod record;
pub mod import;
pub mod error;

pub use bill::{Bill, BillEntry, BillEntries};
pub use ledger::Ledger;
pub use record::LedgerRecord;
pub use import::ledger_from_rows;
pub use error::{LedgerError, ValidationError, FormatError};
