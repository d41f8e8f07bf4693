//! Engine configuration.
//!
//! Every scaling constant used by the planner lives here so that alternative
//! formula variants can be reproduced side by side.  All sections implement
//! `Default` with the canonical values, and every field is `#[serde(default)]`
//! so a JSON file only needs to name the values it overrides:
//!
//! ```json
//! { "routing": { "time_mult": 3.0 }, "credits": { "scheme": "distance_carbon" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── Traffic ───────────────────────────────────────────────────────────────────

/// Parameters of the per-request traffic snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Lower bound of the per-link multiplicative jitter.
    pub jitter_min: f64,
    /// Upper bound of the per-link multiplicative jitter.
    pub jitter_max: f64,
    /// Share of area congestion that reaches eco-priority links.
    pub eco_congestion_damping: f64,
    /// Area congestion factor at which the incident term saturates.
    pub incident_congestion_ceiling: f64,
    /// Weight of the incident term against the user-load term.
    pub incident_blend: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            jitter_min:                  0.9,
            jitter_max:                  1.1,
            eco_congestion_damping:      0.5,
            incident_congestion_ceiling: 3.0,
            incident_blend:              0.7,
        }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// Parameters of the vehicle emission model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Grams per kilogram of CO2.
    pub unit_conversion: f64,
    /// Efficiency (km per unit fuel) at which sensitivity equals `base_sensitivity`.
    pub reference_efficiency: f64,
    pub base_sensitivity: f64,
    /// Upper bound on congestion sensitivity.
    pub max_sensitivity: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            unit_conversion:      1_000.0,
            reference_efficiency: 15.0,
            base_sensitivity:     0.3,
            max_sensitivity:      1.0,
        }
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Goal-mode weight multipliers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Applied to travel time in the fastest and balanced goals.
    pub time_mult: f64,
    /// Applied to emissions in the eco goal.
    pub eco_mult: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { time_mult: 2.0, eco_mult: 5.0 }
    }
}

// ── Alpha ─────────────────────────────────────────────────────────────────────

/// Which alpha heuristic the planner uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaModelKind {
    /// Congestion/incident/acceptance blend bounded to `[0.05, 0.6]`.
    #[default]
    Graph,
    /// Traffic-state blend with a time-of-day term, bounded to `[0.1, 2.0]`.
    TrafficState,
}

/// Alpha heuristic selection and context normalization ceilings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaConfig {
    pub model: AlphaModelKind,
    /// Area congestion factor that normalizes to `1.0`.
    pub max_congestion_factor: f64,
    /// Vehicle efficiency (km per unit fuel) that normalizes to `1.0`.
    pub max_efficiency: f64,
    /// Weather term fed to the traffic-state model; `0.5` is neutral.
    pub weather_factor: f64,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            model:                 AlphaModelKind::Graph,
            max_congestion_factor: 3.0,
            max_efficiency:        30.0,
            weather_factor:        0.5,
        }
    }
}

// ── Credits ───────────────────────────────────────────────────────────────────

/// Which green-credit formula the scorer uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditScheme {
    /// Relative emissions saved, divided by the extra minutes, per passenger.
    #[default]
    RelativeEmissions,
    /// Per-km base credits plus per-kg CO2 bonus, scaled per route variant.
    DistanceCarbon,
}

/// Green-credit scheme and its constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditConfig {
    pub scheme: CreditScheme,
    /// Points awarded for a 100 % emissions reduction at no time cost.
    pub base_points: f64,
    pub credits_per_km: f64,
    pub credits_per_kg_co2: f64,
    /// Distance share for eco routes under `DistanceCarbon`.
    pub eco_distance_pct: f64,
    /// Carbon-bonus share for eco routes under `DistanceCarbon`.
    pub eco_carbon_pct: f64,
    pub balanced_distance_pct: f64,
    pub balanced_carbon_pct: f64,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            scheme:                CreditScheme::RelativeEmissions,
            base_points:           100.0,
            credits_per_km:        0.5,
            credits_per_kg_co2:    5.0,
            eco_distance_pct:      1.0,
            eco_carbon_pct:        1.0,
            balanced_distance_pct: 0.6,
            balanced_carbon_pct:   0.5,
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level planner configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub traffic: TrafficConfig,
    pub vehicle: VehicleConfig,
    pub routing: RoutingConfig,
    pub alpha:   AlphaConfig,
    pub credits: CreditConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would break the cost model's invariants.
    pub fn validate(&self) -> CoreResult<()> {
        let t = &self.traffic;
        if !(t.jitter_min > 0.0 && t.jitter_min <= t.jitter_max) {
            return Err(CoreError::Config(format!(
                "traffic jitter range [{}, {}] must be positive and ordered",
                t.jitter_min, t.jitter_max
            )));
        }
        if !(0.0..=1.0).contains(&t.eco_congestion_damping) {
            return Err(CoreError::Config(
                "traffic.eco_congestion_damping must be in [0, 1]".into(),
            ));
        }
        if !(t.incident_congestion_ceiling > 1.0) {
            return Err(CoreError::Config(
                "traffic.incident_congestion_ceiling must exceed 1.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&t.incident_blend) {
            return Err(CoreError::Config("traffic.incident_blend must be in [0, 1]".into()));
        }

        let v = &self.vehicle;
        if !(v.unit_conversion > 0.0 && v.reference_efficiency > 0.0) {
            return Err(CoreError::Config(
                "vehicle.unit_conversion and vehicle.reference_efficiency must be positive".into(),
            ));
        }
        if !(v.base_sensitivity >= 0.0 && v.max_sensitivity >= 0.0) {
            return Err(CoreError::Config("vehicle sensitivities must be non-negative".into()));
        }

        let r = &self.routing;
        if !(r.time_mult > 0.0 && r.eco_mult > 0.0) {
            return Err(CoreError::Config(
                "routing.time_mult and routing.eco_mult must be positive".into(),
            ));
        }

        let a = &self.alpha;
        if !(a.max_congestion_factor > 1.0 && a.max_efficiency > 0.0) {
            return Err(CoreError::Config(
                "alpha.max_congestion_factor must exceed 1.0 and alpha.max_efficiency must be positive"
                    .into(),
            ));
        }

        let c = &self.credits;
        let shares = [
            c.base_points,
            c.credits_per_km,
            c.credits_per_kg_co2,
            c.eco_distance_pct,
            c.eco_carbon_pct,
            c.balanced_distance_pct,
            c.balanced_carbon_pct,
        ];
        if shares.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(CoreError::Config("credit constants must be finite and non-negative".into()));
        }

        Ok(())
    }
}
