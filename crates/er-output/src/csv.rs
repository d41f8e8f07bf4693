//! CSV ledger backend.
//!
//! Creates two files in the configured output directory:
//! - `audit_entries.csv`
//! - `routes.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AuditRow, OutputResult, RouteRow};
use crate::writer::LedgerWriter;

/// Writes the ledger to two CSV files.
pub struct CsvLedgerWriter {
    entries:  Writer<File>,
    routes:   Writer<File>,
    finished: bool,
}

impl CsvLedgerWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut entries = Writer::from_path(dir.join("audit_entries.csv"))?;
        entries.write_record([
            "seq",
            "alpha",
            "fastest_emissions_g",
            "chosen_emissions_g",
            "fastest_time_min",
            "chosen_time_min",
            "carbon_saved_g",
            "inference_duration_ms",
            "timestamp",
        ])?;

        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record([
            "seq",
            "variant",
            "path",
            "total_time_min",
            "total_emissions_g",
            "total_distance_km",
            "green_credits",
        ])?;

        Ok(Self { entries, routes, finished: false })
    }
}

impl LedgerWriter for CsvLedgerWriter {
    fn write_entries(&mut self, rows: &[AuditRow]) -> OutputResult<()> {
        for row in rows {
            self.entries.write_record(&[
                row.seq.to_string(),
                row.alpha.to_string(),
                row.fastest_emissions_g.to_string(),
                row.chosen_emissions_g.to_string(),
                row.fastest_time_min.to_string(),
                row.chosen_time_min.to_string(),
                row.carbon_saved_g.to_string(),
                row.inference_duration_ms.to_string(),
                row.timestamp.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.seq.to_string(),
                row.variant.clone(),
                row.path.clone(),
                row.total_time_min.to_string(),
                row.total_emissions_g.to_string(),
                row.total_distance_km.to_string(),
                row.green_credits.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.entries.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
