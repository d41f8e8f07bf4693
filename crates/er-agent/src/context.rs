//! Normalized inputs to the alpha heuristics.

use serde::{Deserialize, Serialize};

use er_core::{AlphaConfig, FuelType, TripContext, VehicleProfile};

/// Heuristic inputs, each scaled to `[0, 1]` except `time_of_day`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlphaContext {
    /// `(avgCF − 1) / (maxCF − 1)`.
    pub congestion:            f64,
    pub incident_density:      f64,
    pub historical_acceptance: f64,
    /// `efficiency / maxEfficiency`.
    pub vehicle_efficiency:    f64,
    pub fuel_type:             FuelType,
    /// Hour of day in `[0, 24)`.
    pub time_of_day:           f64,
    pub weather:               f64,
}

impl AlphaContext {
    /// Normalize a request's raw inputs against the ceilings in `cfg`.
    ///
    /// Non-finite components read as `0`.
    pub fn normalize(
        trip: &TripContext,
        vehicle: &VehicleProfile,
        incident_density: f64,
        cfg: &AlphaConfig,
    ) -> Self {
        let congestion_span = cfg.max_congestion_factor - 1.0;
        let congestion = if congestion_span > 0.0 {
            unit((trip.effective_congestion() - 1.0) / congestion_span)
        } else {
            0.0
        };
        let vehicle_efficiency = if cfg.max_efficiency > 0.0 {
            unit(vehicle.efficiency_rating / cfg.max_efficiency)
        } else {
            0.0
        };
        let time_of_day = if trip.time_of_day.is_finite() {
            trip.time_of_day.rem_euclid(24.0)
        } else {
            0.0
        };

        Self {
            congestion,
            incident_density:      unit(incident_density),
            historical_acceptance: unit(trip.historical_acceptance),
            vehicle_efficiency,
            fuel_type:             vehicle.fuel_type,
            time_of_day,
            weather:               unit(cfg.weather_factor),
        }
    }

    /// Integer hour in `0..24`.
    #[inline]
    pub fn hour(&self) -> u32 {
        (self.time_of_day as u32) % 24
    }
}

impl Default for AlphaContext {
    fn default() -> Self {
        Self {
            congestion:            0.0,
            incident_density:      0.0,
            historical_acceptance: 0.0,
            vehicle_efficiency:    0.5,
            fuel_type:             FuelType::Petrol,
            time_of_day:           12.0,
            weather:               0.5,
        }
    }
}

#[inline]
fn unit(x: f64) -> f64 {
    if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }
}
