//! `er-output` — the audit ledger and its exporters.
//!
//! The [`AuditLedger`] is an in-memory, append-only record of planning
//! outcomes.  Exporting it is optional; two backends are provided:
//!
//! | Feature   | Backend | Files created                       |
//! |-----------|---------|-------------------------------------|
//! | *(none)*  | CSV     | `audit_entries.csv`, `routes.csv`   |
//! | `sqlite`  | SQLite  | `ledger.db`                         |
//!
//! Both implement [`LedgerWriter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use er_output::{write_ledger, CsvLedgerWriter};
//!
//! let mut writer = CsvLedgerWriter::new(Path::new("./output"))?;
//! write_ledger(&ledger, &mut writer)?;
//! writer.write_routes(&route_rows)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod ledger;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvLedgerWriter;
pub use error::{OutputError, OutputResult};
pub use ledger::{AuditEntry, AuditLedger};
pub use row::{AuditRow, RouteRow};
pub use writer::{write_ledger, LedgerWriter};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLedgerWriter;
