//! Per-request trip context.

use serde::{Deserialize, Serialize};

/// Situational inputs for one planning request.
///
/// `avg_congestion_factor` drives the traffic simulator; the remaining fields
/// only feed the alpha heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripContext {
    /// Hour of day in `[0, 24)`.
    pub time_of_day: f64,
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u8,
    /// Area-wide congestion factor, `>= 1.0`.
    pub avg_congestion_factor: f64,
    /// Share of past suggestions the user accepted, in `[0, 1]`.
    pub historical_acceptance: f64,
}

impl TripContext {
    pub fn new(time_of_day: f64, day_of_week: u8, avg_congestion_factor: f64, historical_acceptance: f64) -> Self {
        Self { time_of_day, day_of_week, avg_congestion_factor, historical_acceptance }
    }

    /// Area congestion with sub-1.0 and non-finite values lifted to free flow.
    #[inline]
    pub fn effective_congestion(&self) -> f64 {
        if self.avg_congestion_factor.is_finite() {
            self.avg_congestion_factor.max(1.0)
        } else {
            1.0
        }
    }

    /// Integer hour in `0..24`.
    #[inline]
    pub fn hour(&self) -> u32 {
        if self.time_of_day.is_finite() {
            (self.time_of_day.rem_euclid(24.0)) as u32 % 24
        } else {
            0
        }
    }
}

impl Default for TripContext {
    /// Midday Monday at free flow, no acceptance history.
    fn default() -> Self {
        Self::new(12.0, 0, 1.0, 0.0)
    }
}
