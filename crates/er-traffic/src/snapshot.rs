//! Immutable per-request traffic state.

use serde::{Deserialize, Serialize};

use er_core::LinkId;
use er_network::RoadNetwork;

/// Per-link congestion factors plus one incident-density scalar.
///
/// `link_congestion` is indexed by `LinkId` and has one entry per directed
/// link of the network it was generated for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    link_congestion:  Vec<f64>,
    incident_density: f64,
    /// The area congestion the snapshot was generated from.
    area_congestion:  f64,
}

impl TrafficSnapshot {
    /// Assemble a snapshot from raw parts.
    ///
    /// Factors below `1.0` (or non-finite) are lifted to `1.0` and the incident
    /// density is clamped to `[0, 1]`, so every snapshot satisfies the
    /// congestion and incident invariants regardless of its source.
    pub fn from_parts(link_congestion: Vec<f64>, incident_density: f64, area_congestion: f64) -> Self {
        let link_congestion = link_congestion
            .into_iter()
            .map(|cf| if cf.is_finite() { cf.max(1.0) } else { 1.0 })
            .collect();
        let incident_density = if incident_density.is_finite() {
            incident_density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { link_congestion, incident_density, area_congestion: area_congestion.max(1.0) }
    }

    /// Every link at `congestion`, with the given incident density.
    pub fn uniform(network: &RoadNetwork, congestion: f64, incident_density: f64) -> Self {
        Self::from_parts(vec![congestion; network.link_count()], incident_density, congestion)
    }

    /// Free-flow traffic, no incidents.
    pub fn free_flow(network: &RoadNetwork) -> Self {
        Self::uniform(network, 1.0, 0.0)
    }

    /// Congestion factor of `link`.  Links outside the snapshot read as free flow.
    #[inline]
    pub fn congestion(&self, link: LinkId) -> f64 {
        self.link_congestion.get(link.index()).copied().unwrap_or(1.0)
    }

    #[inline]
    pub fn incident_density(&self) -> f64 {
        self.incident_density
    }

    #[inline]
    pub fn area_congestion(&self) -> f64 {
        self.area_congestion
    }

    pub fn link_count(&self) -> usize {
        self.link_congestion.len()
    }

    /// `true` if the snapshot has one factor per link of `network`.
    pub fn matches(&self, network: &RoadNetwork) -> bool {
        self.link_congestion.len() == network.link_count()
    }

    /// Mean factor across all links; `1.0` for an empty snapshot.
    pub fn mean_congestion(&self) -> f64 {
        if self.link_congestion.is_empty() {
            return 1.0;
        }
        self.link_congestion.iter().sum::<f64>() / self.link_congestion.len() as f64
    }
}
