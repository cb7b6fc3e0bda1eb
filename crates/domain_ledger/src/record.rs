//! Persisted document contract
//!
//! The on-disk form of a ledger is a single JSON object:
//!
//! ```text
//! {
//!   "name": "trip",
//!   "workspace": "work_dir",
//!   "users": ["A", "B"],
//!   "bills": {
//!     "fuel": { "A": {"payment": 100.0, "share": 0.5}, "B": {"payment": 0.0, "share": 0.5} }
//!   }
//! }
//! ```
//!
//! `bills` is an object keyed by bill id whose key order is the bill order.

use serde::{Deserialize, Serialize};

use core_kernel::{BillId, ParticipantId};
use crate::bill::{Bill, BillEntries};
use crate::error::{FormatError, LedgerError};
use crate::ledger::Ledger;

/// Wire form of a [`Ledger`], not yet validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub name: String,
    pub workspace: String,
    pub users: Vec<ParticipantId>,
    #[serde(with = "ordered_bills")]
    pub bills: Vec<(BillId, BillEntries)>,
}

impl LedgerRecord {
    /// Parses a JSON document without validating ledger invariants
    pub fn from_json(raw: &str) -> Result<Self, FormatError> {
        serde_json::from_str(raw).map_err(FormatError::Json)
    }

    /// Encodes the record as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, LedgerError> {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        encoded.map_err(|e| FormatError::Json(e).into())
    }

    /// Validates the record and turns it into a ledger
    pub fn into_ledger(self) -> Result<Ledger, LedgerError> {
        let bills = self
            .bills
            .into_iter()
            .map(|(id, entries)| Bill { id, entries })
            .collect();

        Ok(Ledger::new(self.name, self.workspace, self.users, bills)?)
    }
}

impl From<&Ledger> for LedgerRecord {
    fn from(ledger: &Ledger) -> Self {
        Self {
            name: ledger.name().to_string(),
            workspace: ledger.workspace().to_string(),
            users: ledger.participants().to_vec(),
            bills: ledger
                .bills()
                .iter()
                .map(|b| (b.id.clone(), b.entries.clone()))
                .collect(),
        }
    }
}

/// Serializes a list of bills as a JSON object while keeping their order
mod ordered_bills {
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use core_kernel::BillId;
    use crate::bill::BillEntries;

    pub fn serialize<S>(bills: &[(BillId, BillEntries)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(bills.iter().map(|(id, entries)| (id, entries)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(BillId, BillEntries)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BillsVisitor;

        impl<'de> Visitor<'de> for BillsVisitor {
            type Value = Vec<(BillId, BillEntries)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping bill ids to participant entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut bills = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, entries)) = access.next_entry::<BillId, BillEntries>()? {
                    bills.push((id, entries));
                }
                Ok(bills)
            }
        }

        deserializer.deserialize_map(BillsVisitor)
    }
}
