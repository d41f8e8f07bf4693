//! Vehicle profiles and their derived emission parameters.
//!
//! A [`VehicleProfile`] is what the user supplies; an [`EmissionProfile`] is
//! what the cost evaluator consumes.  [`VehicleProfile::resolve`] is the only
//! way to get from one to the other.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, VehicleConfig};

/// Fuel / energy source of a vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Electric,
    Cng,
    Hybrid,
}

impl FuelType {
    pub const ALL: [FuelType; 5] = [
        FuelType::Petrol,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Cng,
        FuelType::Hybrid,
    ];

    /// Tailpipe kg CO2 per unit of fuel (litre, or kg for CNG).
    ///
    /// Electric vehicles have no tailpipe emissions and return `0.0`.
    pub fn co2_kg_per_unit(self) -> f64 {
        match self {
            FuelType::Petrol   => 2.31,
            FuelType::Diesel   => 2.68,
            FuelType::Cng      => 2.75,
            FuelType::Hybrid   => 1.85,
            FuelType::Electric => 0.0,
        }
    }

    /// Typical efficiency in km per unit of fuel (kWh for electric).
    pub fn typical_efficiency(self) -> f64 {
        match self {
            FuelType::Petrol   => 15.0,
            FuelType::Diesel   => 18.0,
            FuelType::Cng      => 25.0,
            FuelType::Hybrid   => 22.0,
            FuelType::Electric => 5.0,
        }
    }

    #[inline]
    pub fn is_electric(self) -> bool {
        matches!(self, FuelType::Electric)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Petrol   => "petrol",
            FuelType::Diesel   => "diesel",
            FuelType::Electric => "electric",
            FuelType::Cng      => "cng",
            FuelType::Hybrid   => "hybrid",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FuelType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" | "gasoline"       => Ok(FuelType::Petrol),
            "diesel"                    => Ok(FuelType::Diesel),
            "electric" | "ev"           => Ok(FuelType::Electric),
            "cng"                       => Ok(FuelType::Cng),
            "hybrid" | "hybrid_petrol"  => Ok(FuelType::Hybrid),
            other => Err(CoreError::InvalidInput(format!("unknown fuel type {other:?}"))),
        }
    }
}

// ── VehicleProfile ────────────────────────────────────────────────────────────

/// User-supplied vehicle attributes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub fuel_type: FuelType,
    /// Distance per unit of fuel (km/L, km/kg, or km/kWh).
    pub efficiency_rating: f64,
    pub passenger_count: u32,
}

impl VehicleProfile {
    pub fn new(fuel_type: FuelType, efficiency_rating: f64, passenger_count: u32) -> Self {
        Self { fuel_type, efficiency_rating, passenger_count }
    }

    /// A single-occupant vehicle with the fuel type's typical efficiency.
    pub fn typical(fuel_type: FuelType) -> Self {
        Self::new(fuel_type, fuel_type.typical_efficiency(), 1)
    }

    /// Derive the emission rate and congestion sensitivity.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] if `passenger_count` is zero, or if the
    /// vehicle is not electric and `efficiency_rating` is not a positive
    /// finite number.
    pub fn resolve(&self, config: &VehicleConfig) -> CoreResult<EmissionProfile> {
        if self.passenger_count == 0 {
            return Err(CoreError::InvalidInput("passenger count must be at least 1".into()));
        }

        if self.fuel_type.is_electric() {
            return Ok(EmissionProfile {
                base_emission_rate:     0.0,
                congestion_sensitivity: 0.0,
                electric:               true,
            });
        }

        let efficiency = self.efficiency_rating;
        if !(efficiency.is_finite() && efficiency > 0.0) {
            return Err(CoreError::InvalidInput(format!(
                "efficiency rating must be positive for {} vehicles, got {efficiency}",
                self.fuel_type
            )));
        }

        let base_emission_rate =
            config.unit_conversion * self.fuel_type.co2_kg_per_unit() / efficiency;
        let congestion_sensitivity = (config.base_sensitivity * config.reference_efficiency
            / efficiency)
            .min(config.max_sensitivity);

        Ok(EmissionProfile { base_emission_rate, congestion_sensitivity, electric: false })
    }
}

// ── EmissionProfile ───────────────────────────────────────────────────────────

/// Emission parameters consumed by the edge cost evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionProfile {
    /// Grams of CO2 per km at free flow.
    pub base_emission_rate: f64,
    /// Fractional emission increase per unit of congestion above 1.0.
    pub congestion_sensitivity: f64,
    /// Electric vehicles skip the congestion penalty entirely.
    pub electric: bool,
}
