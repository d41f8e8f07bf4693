//! The `LedgerWriter` trait implemented by all backend writers.

use tracing::info;

use crate::{AuditLedger, AuditRow, OutputResult, RouteRow};

/// Trait implemented by the CSV and SQLite writers.
pub trait LedgerWriter {
    /// Write a batch of ledger entries.
    fn write_entries(&mut self, rows: &[AuditRow]) -> OutputResult<()>;

    /// Write a batch of route rows.
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every entry of `ledger`, numbered from 0 in append order.
pub fn write_ledger<W: LedgerWriter + ?Sized>(ledger: &AuditLedger, writer: &mut W) -> OutputResult<()> {
    let rows: Vec<AuditRow> = ledger
        .iter()
        .enumerate()
        .map(|(i, e)| AuditRow::new(i as u64, e))
        .collect();
    writer.write_entries(&rows)?;
    info!(entries = rows.len(), "ledger exported");
    Ok(())
}
