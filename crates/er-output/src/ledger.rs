//! Append-only audit ledger.
//!
//! One [`AuditEntry`] per planning request, comparing the balanced route the
//! alpha heuristic chose against the fastest route.  Entries are never
//! mutated or removed; the ledger only grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use er_routing::RouteResult;

// ── AuditEntry ────────────────────────────────────────────────────────────────

/// Outcome of one planning request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub alpha:                 f64,
    pub fastest_emissions_g:   f64,
    pub chosen_emissions_g:    f64,
    pub fastest_time_min:      f64,
    pub chosen_time_min:       f64,
    /// `fastest − chosen`; negative if the chosen route emits more.
    pub carbon_saved_g:        f64,
    pub inference_duration_ms: f64,
    pub timestamp:             DateTime<Utc>,
}

impl AuditEntry {
    /// Entry comparing `chosen` against `fastest`.
    pub fn from_routes(
        alpha: f64,
        fastest: &RouteResult,
        chosen: &RouteResult,
        inference_duration_ms: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            alpha,
            fastest_emissions_g:   fastest.total_emissions_g,
            chosen_emissions_g:    chosen.total_emissions_g,
            fastest_time_min:      fastest.total_time_min,
            chosen_time_min:       chosen.total_time_min,
            carbon_saved_g:        fastest.total_emissions_g - chosen.total_emissions_g,
            inference_duration_ms,
            timestamp,
        }
    }

    /// Extra minutes the chosen route costs over the fastest.
    pub fn time_cost_min(&self) -> f64 {
        self.chosen_time_min - self.fastest_time_min
    }
}

// ── AuditLedger ───────────────────────────────────────────────────────────────

/// In-memory append-only ledger.
#[derive(Clone, Debug, Default)]
pub struct AuditLedger {
    entries: Vec<AuditEntry>,
}

impl AuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, returning its zero-based sequence number.
    pub fn append(&mut self, entry: AuditEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &AuditEntry> + '_ {
        self.entries.iter().rev().take(n)
    }

    /// Sum of positive `carbon_saved_g` over all entries.
    pub fn cumulative_carbon_saved(&self) -> f64 {
        self.entries.iter().map(|e| e.carbon_saved_g.max(0.0)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, AuditEntry> {
        self.entries.iter()
    }

    /// Mean alpha over all entries; `None` when empty.
    pub fn average_alpha(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.iter().map(|e| e.alpha).sum::<f64>() / self.entries.len() as f64)
    }
}

impl<'a> IntoIterator for &'a AuditLedger {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
