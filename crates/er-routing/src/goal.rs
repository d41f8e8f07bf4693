//! Goal modes and their per-link weight functions.

use serde::{Deserialize, Serialize};

use er_core::RoutingConfig;

use crate::EdgeCost;

/// What a single path search minimizes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "goal", rename_all = "snake_case")]
pub enum RouteGoal {
    /// Travel time only.
    Fastest,
    /// Emissions only.
    Eco,
    /// Emissions weighted by `alpha`, plus travel time.
    Balanced { alpha: f64 },
}

impl RouteGoal {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteGoal::Fastest       => "fastest",
            RouteGoal::Eco           => "eco",
            RouteGoal::Balanced { .. } => "balanced",
        }
    }
}

impl std::fmt::Display for RouteGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteGoal::Balanced { alpha } => write!(f, "balanced(alpha={alpha:.3})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Multipliers that turn an [`EdgeCost`] into a scalar search weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoalWeights {
    pub time_mult: f64,
    pub eco_mult:  f64,
}

impl GoalWeights {
    /// Search weight of a link under `goal`.
    ///
    /// | Goal     | Weight                                   |
    /// |----------|------------------------------------------|
    /// | fastest  | `time * time_mult`                       |
    /// | eco      | `emissions * eco_mult`                   |
    /// | balanced | `emissions * alpha + time * time_mult`   |
    #[inline]
    pub fn weight(&self, goal: RouteGoal, cost: EdgeCost) -> f64 {
        match goal {
            RouteGoal::Fastest => cost.travel_time_min * self.time_mult,
            RouteGoal::Eco     => cost.emissions_g * self.eco_mult,
            RouteGoal::Balanced { alpha } => {
                cost.emissions_g * alpha + cost.travel_time_min * self.time_mult
            }
        }
    }
}

impl Default for GoalWeights {
    fn default() -> Self {
        Self::from(&RoutingConfig::default())
    }
}

impl From<&RoutingConfig> for GoalWeights {
    fn from(cfg: &RoutingConfig) -> Self {
        Self { time_mult: cfg.time_mult, eco_mult: cfg.eco_mult }
    }
}
