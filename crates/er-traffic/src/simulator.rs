//! Traffic snapshot generation.
//!
//! # Model
//!
//! For area congestion `cf = max(1, avgCF)` and a per-link jitter
//! `j ∈ [jitter_min, jitter_max]`:
//!
//! ```text
//! ordinary link : cf * j
//! eco link      : (1 + (cf - 1) * eco_congestion_damping) * j
//! ```
//!
//! Both are floored at `1.0`.  Incident density blends a random incident term
//! with normalized area congestion and an independent user-load term:
//!
//! ```text
//! idf = 0.5 * r1 + 0.5 * clamp((cf - 1) / (ceiling - 1), 0, 1)
//! ulf = r2
//! incident_density = clamp(blend * idf + (1 - blend) * ulf, 0, 1)
//! ```
//!
//! # Draw order
//!
//! One jitter draw per link in `LinkId` order, then `r1`, then `r2`.  A
//! seeded source therefore reproduces a snapshot exactly.

use tracing::debug;

use er_core::{LinkId, RandomSource, TrafficConfig};
use er_network::RoadNetwork;

use crate::TrafficSnapshot;

/// Generates [`TrafficSnapshot`]s from an area congestion factor.
#[derive(Clone, Debug, Default)]
pub struct TrafficSimulator {
    config: TrafficConfig,
}

impl TrafficSimulator {
    pub fn new(config: TrafficConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    /// Produce one snapshot for `network` under area congestion `avg_cf`.
    ///
    /// Values of `avg_cf` below `1.0` (or non-finite) are treated as free flow.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        network: &RoadNetwork,
        avg_cf: f64,
        rng: &mut R,
    ) -> TrafficSnapshot {
        let cfg = &self.config;
        let cf = if avg_cf.is_finite() { avg_cf.max(1.0) } else { 1.0 };
        let eco_cf = 1.0 + (cf - 1.0) * cfg.eco_congestion_damping;

        let link_congestion: Vec<f64> = (0..network.link_count())
            .map(|i| {
                let jitter = rng.uniform(cfg.jitter_min, cfg.jitter_max);
                let base = if network.link(LinkId(i as u32)).eco_priority { eco_cf } else { cf };
                (base * jitter).max(1.0)
            })
            .collect();

        let norm_congestion =
            ((cf - 1.0) / (cfg.incident_congestion_ceiling - 1.0)).clamp(0.0, 1.0);
        let idf = 0.5 * rng.next_unit() + 0.5 * norm_congestion;
        let ulf = rng.next_unit();
        let incident_density =
            (cfg.incident_blend * idf + (1.0 - cfg.incident_blend) * ulf).clamp(0.0, 1.0);

        let snapshot = TrafficSnapshot::from_parts(link_congestion, incident_density, cf);
        debug!(
            area_congestion = cf,
            mean_congestion = snapshot.mean_congestion(),
            incident_density,
            "traffic snapshot generated"
        );
        snapshot
    }
}

// ── Hour-of-day estimate ──────────────────────────────────────────────────────

/// `true` during the morning (07–09) and evening (17–19) rush.
pub fn is_peak_hour(hour: u32) -> bool {
    (7..=9).contains(&hour) || (17..=19).contains(&hour)
}

/// Typical area congestion factor for an hour of the day.
///
/// Maps a base traffic level (rush 0.7, daytime 0.5, night 0.2, otherwise
/// 0.3) onto a congestion factor `1 + 2 * level`, so rush hour reads 2.4 and
/// night 1.4.  Used when the caller supplies no congestion figure.
pub fn estimate_area_congestion(hour: u32) -> f64 {
    let hour = hour % 24;
    let level = if is_peak_hour(hour) {
        0.7
    } else if (10..=16).contains(&hour) {
        0.5
    } else if hour >= 22 || hour <= 6 {
        0.2
    } else {
        0.3
    };
    1.0 + 2.0 * level
}
