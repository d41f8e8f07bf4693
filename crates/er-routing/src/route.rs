//! Route results.

use serde::{Deserialize, Serialize};

use er_core::{LinkId, NodeId};

use crate::RouteGoal;

/// Which goal produced a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteVariant {
    Fastest,
    Eco,
    Balanced,
}

impl RouteVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteVariant::Fastest  => "fastest",
            RouteVariant::Eco      => "eco",
            RouteVariant::Balanced => "balanced",
        }
    }
}

impl From<RouteGoal> for RouteVariant {
    fn from(goal: RouteGoal) -> Self {
        match goal {
            RouteGoal::Fastest         => RouteVariant::Fastest,
            RouteGoal::Eco             => RouteVariant::Eco,
            RouteGoal::Balanced { .. } => RouteVariant::Balanced,
        }
    }
}

impl std::fmt::Display for RouteVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One computed route.
///
/// `path` has one more entry than `links`; `links[i]` goes from `path[i]` to
/// `path[i + 1]`.  Totals are the sums of the per-link costs under the
/// request's traffic snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub variant:             RouteVariant,
    pub path:                Vec<NodeId>,
    pub links:               Vec<LinkId>,
    /// Minutes.
    pub total_time_min:      f64,
    /// Grams of CO2.
    pub total_emissions_g:   f64,
    /// Kilometres.
    pub total_distance_km:   f64,
    pub green_credits:       f64,
}

impl RouteResult {
    pub fn origin(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Same result with `green_credits` replaced.
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.green_credits = credits;
        self
    }
}
