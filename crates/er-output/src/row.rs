//! Flat row types written by ledger backends.

use er_routing::RouteResult;

use crate::AuditEntry;

/// One ledger entry with its sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRow {
    pub seq:                   u64,
    pub alpha:                 f64,
    pub fastest_emissions_g:   f64,
    pub chosen_emissions_g:    f64,
    pub fastest_time_min:      f64,
    pub chosen_time_min:       f64,
    pub carbon_saved_g:        f64,
    pub inference_duration_ms: f64,
    /// RFC 3339, UTC.
    pub timestamp:             String,
}

impl AuditRow {
    pub fn new(seq: u64, entry: &AuditEntry) -> Self {
        Self {
            seq,
            alpha:                 entry.alpha,
            fastest_emissions_g:   entry.fastest_emissions_g,
            chosen_emissions_g:    entry.chosen_emissions_g,
            fastest_time_min:      entry.fastest_time_min,
            chosen_time_min:       entry.chosen_time_min,
            carbon_saved_g:        entry.carbon_saved_g,
            inference_duration_ms: entry.inference_duration_ms,
            timestamp:             entry.timestamp.to_rfc3339(),
        }
    }
}

/// One route variant of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    /// Sequence number of the request's ledger entry.
    pub seq:               u64,
    pub variant:           String,
    /// Node keys joined with `-`, e.g. `A-C-F-H-I-J`.
    pub path:              String,
    pub total_time_min:    f64,
    pub total_emissions_g: f64,
    pub total_distance_km: f64,
    pub green_credits:     f64,
}

impl RouteRow {
    /// `path_keys` is the route's node path rendered as keys.
    pub fn new(seq: u64, route: &RouteResult, path_keys: &[&str]) -> Self {
        Self {
            seq,
            variant:           route.variant.as_str().to_owned(),
            path:              path_keys.join("-"),
            total_time_min:    route.total_time_min,
            total_emissions_g: route.total_emissions_g,
            total_distance_km: route.total_distance_km,
            green_credits:     route.green_credits,
        }
    }
}
