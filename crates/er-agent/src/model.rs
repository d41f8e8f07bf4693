//! The `AlphaModel` trait and the two built-in heuristics.

use std::f64::consts::PI;

use er_core::{AlphaModelKind, FuelType};

use crate::AlphaContext;

/// Pluggable alpha predictor.
///
/// # Thread safety
///
/// The planner holds one model for its lifetime and may be shared across
/// threads, so implementations must be `Send + Sync` and keep no per-request
/// state.
pub trait AlphaModel: Send + Sync {
    /// Short identifier recorded with each prediction.
    fn name(&self) -> &'static str;

    /// Inclusive `(min, max)` range of [`predict`][Self::predict].
    fn bounds(&self) -> (f64, f64);

    /// Emissions weight for the balanced search.  Must lie within
    /// [`bounds`][Self::bounds] for every context.
    fn predict(&self, ctx: &AlphaContext) -> f64;
}

/// Boxed model for a configured kind.
pub fn model_for(kind: AlphaModelKind) -> Box<dyn AlphaModel> {
    match kind {
        AlphaModelKind::Graph        => Box::new(GraphAlphaHeuristic),
        AlphaModelKind::TrafficState => Box::new(TrafficStateAlpha),
    }
}

// ── GraphAlphaHeuristic ───────────────────────────────────────────────────────

/// Default heuristic.
///
/// ```text
/// alpha = 0.05 + 0.3*congestion − 0.1*incidents + 0.1*acceptance
///         (+0.05 if efficiency < 0.3; fixed 0.05 for electric)
/// ```
/// clamped to `[0.05, 0.6]`.  Electric vehicles emit nothing, so the
/// emissions term only needs the floor weight.
#[derive(Copy, Clone, Debug, Default)]
pub struct GraphAlphaHeuristic;

impl GraphAlphaHeuristic {
    pub const MIN: f64 = 0.05;
    pub const MAX: f64 = 0.6;
    const LOW_EFFICIENCY: f64 = 0.3;
}

impl AlphaModel for GraphAlphaHeuristic {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn bounds(&self) -> (f64, f64) {
        (Self::MIN, Self::MAX)
    }

    fn predict(&self, ctx: &AlphaContext) -> f64 {
        let alpha = if ctx.fuel_type == FuelType::Electric {
            0.05
        } else {
            let mut a = 0.05 + 0.3 * ctx.congestion - 0.1 * ctx.incident_density
                + 0.1 * ctx.historical_acceptance;
            if ctx.vehicle_efficiency < Self::LOW_EFFICIENCY {
                a += 0.05;
            }
            a
        };
        clamp_finite(alpha, Self::MIN, Self::MAX)
    }
}

// ── TrafficStateAlpha ─────────────────────────────────────────────────────────

/// Traffic-state heuristic with a time-of-day swing.
///
/// ```text
/// alpha = 1.0 + clamp(0.5*congestion) + clamp(0.3*incidents)
///             + |0.2*sin(2π·hour/24)| + 0.1*weather
/// ```
/// clamped to `[0.1, 2.0]`.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrafficStateAlpha;

impl TrafficStateAlpha {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 2.0;

    const BASE:            f64 = 1.0;
    const TRAFFIC_WEIGHT:  f64 = 0.5;
    const INCIDENT_WEIGHT: f64 = 0.3;
    const TIME_WEIGHT:     f64 = 0.2;
    const WEATHER_WEIGHT:  f64 = 0.1;
}

impl AlphaModel for TrafficStateAlpha {
    fn name(&self) -> &'static str {
        "traffic_state"
    }

    fn bounds(&self) -> (f64, f64) {
        (Self::MIN, Self::MAX)
    }

    fn predict(&self, ctx: &AlphaContext) -> f64 {
        let traffic  = (ctx.congestion * Self::TRAFFIC_WEIGHT).clamp(0.0, 1.0);
        let incident = (ctx.incident_density * Self::INCIDENT_WEIGHT).clamp(0.0, 1.0);
        let time     = ((ctx.time_of_day * 2.0 * PI / 24.0).sin() * Self::TIME_WEIGHT).abs();
        let weather  = ctx.weather * Self::WEATHER_WEIGHT;

        clamp_finite(Self::BASE + traffic + incident + time + weather, Self::MIN, Self::MAX)
    }
}

/// Clamp, mapping NaN to the lower bound.
#[inline]
fn clamp_finite(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() { lo } else { x.clamp(lo, hi) }
}
