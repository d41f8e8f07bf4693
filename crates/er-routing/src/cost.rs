//! The edge cost function.
//!
//! [`evaluate`] is a pure function of a link, an emission profile, the link's
//! congestion factor, and the request's incident density.  The pathfinder
//! calls it lazily during relaxation and again when totalling a finished
//! path, and both calls must agree bit for bit.

use er_core::EmissionProfile;
use er_network::Link;

/// Incident density above which travel times are inflated.
pub const INCIDENT_THRESHOLD: f64 = 0.5;

/// Travel-time inflation per unit of incident density above the threshold.
pub const INCIDENT_TIME_PENALTY: f64 = 0.2;

/// Emissions and travel time of traversing one link.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeCost {
    /// Grams of CO2.
    pub emissions_g: f64,
    /// Minutes.
    pub travel_time_min: f64,
}

/// Cost of traversing `link` under `congestion` and `incident_density`.
///
/// ```text
/// emissions = distance * rate * multiplier * (1 + (cf - 1) * sensitivity)   [non-electric]
/// time      = time * cf * (1 + incident * 0.2 if incident > 0.5)
/// ```
#[inline]
pub fn evaluate(link: &Link, emission: &EmissionProfile, congestion: f64, incident_density: f64) -> EdgeCost {
    let mut emissions_g =
        link.distance_km * emission.base_emission_rate * link.emissions_multiplier;
    if !emission.electric {
        emissions_g *= 1.0 + (congestion - 1.0) * emission.congestion_sensitivity;
    }

    let mut travel_time_min = link.time_min * congestion;
    if incident_density > INCIDENT_THRESHOLD {
        travel_time_min *= 1.0 + incident_density * INCIDENT_TIME_PENALTY;
    }

    EdgeCost { emissions_g, travel_time_min }
}
