//! Request and response types.

use serde::{Deserialize, Serialize};

use er_agent::AlphaPrediction;
use er_core::{NodeId, TripContext, VehicleProfile};
use er_output::AuditEntry;
use er_routing::{RouteResult, RouteVariant};

/// One planning request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub origin:         NodeId,
    pub destination:    NodeId,
    pub vehicle:        VehicleProfile,
    pub context:        TripContext,
    /// Skip the alpha heuristic and use this weight instead.
    pub alpha_override: Option<f64>,
}

impl PlanRequest {
    pub fn new(origin: NodeId, destination: NodeId, vehicle: VehicleProfile, context: TripContext) -> Self {
        Self { origin, destination, vehicle, context, alpha_override: None }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha_override = Some(alpha);
        self
    }
}

/// Where a response's routes were computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// By the remote optimizer.
    Remote,
    /// Locally; no remote optimizer is configured.
    Local,
    /// Locally, after the remote optimizer failed.
    LocalFallback,
}

impl PlanSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanSource::Remote        => "remote",
            PlanSource::Local         => "local",
            PlanSource::LocalFallback => "local_fallback",
        }
    }
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of the traffic snapshot a local plan ran against.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub incident_density: f64,
    pub mean_congestion:  f64,
    pub area_congestion:  f64,
}

/// Result of one planning request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Fastest, eco, and balanced variants by descending green credits.
    pub routes:     Vec<RouteResult>,
    pub audit:      AuditEntry,
    /// Sequence number of `audit` in the ledger.
    pub ledger_seq: usize,
    pub source:     PlanSource,
    pub alpha:      AlphaPrediction,
    /// `None` for remote plans.
    pub traffic:    Option<TrafficSummary>,
}

impl PlanResponse {
    pub fn route(&self, variant: RouteVariant) -> Option<&RouteResult> {
        self.routes.iter().find(|r| r.variant == variant)
    }

    /// Highest-credit route.
    pub fn best(&self) -> Option<&RouteResult> {
        self.routes.first()
    }
}
