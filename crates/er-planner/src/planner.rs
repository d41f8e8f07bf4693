//! The `RoutePlanner` and its request pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use er_agent::{predict_alpha, AlphaContext, AlphaModel, AlphaPrediction};
use er_core::{EmissionProfile, EngineConfig, RandomSource};
use er_credits::GreenCreditScorer;
use er_network::RoadNetwork;
use er_output::{AuditEntry, AuditLedger};
use er_routing::{CostInputs, DijkstraPathfinder, GoalWeights, Pathfinder, RouteGoal, RouteResult};
use er_traffic::{TrafficSimulator, TrafficSnapshot};

use crate::remote::check_remote_plan;
use crate::{
    PlanError, PlanRequest, PlanResponse, PlanResult, PlanSource, RemoteOptimizer, TrafficSummary,
};

// ── PlannerStats ──────────────────────────────────────────────────────────────

/// Request counters and accumulated planning time, updated through `&self`.
#[derive(Debug, Default)]
pub struct PlannerStats {
    requests:       AtomicU64,
    fallbacks:      AtomicU64,
    remote_plans:   AtomicU64,
    planning_nanos: AtomicU64,
}

impl PlannerStats {
    /// Requests answered with routes, from any source.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Requests recomputed locally after a remote failure.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Requests answered by the remote optimizer.
    pub fn remote_plans(&self) -> u64 {
        self.remote_plans.load(Ordering::Relaxed)
    }

    /// Wall time spent in successful [`plan`][RoutePlanner::plan] and
    /// [`plan_with_snapshot`][RoutePlanner::plan_with_snapshot] calls.
    pub fn total_planning_time(&self) -> Duration {
        Duration::from_nanos(self.planning_nanos.load(Ordering::Relaxed))
    }

    /// `total_planning_time / requests`; `None` before the first request.
    pub fn mean_planning_time(&self) -> Option<Duration> {
        let requests = self.requests();
        if requests == 0 {
            return None;
        }
        Some(Duration::from_nanos(self.planning_nanos.load(Ordering::Relaxed) / requests))
    }

    fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.planning_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Plans fastest, eco, and balanced routes for one request at a time.
///
/// Each local request runs a fixed pipeline:
///
/// 1. **Validate** endpoints, vehicle, and any alpha override (finite, `>= 0`).
/// 2. **Remote** — if an optimizer is configured, try it first; on failure
///    fall through to local planning.
/// 3. **Snapshot** — one [`TrafficSnapshot`] from the injected RNG.
/// 4. **Alpha** — override, or the configured [`AlphaModel`].
/// 5. **Search** — three goal searches over the same snapshot (concurrently
///    with the `parallel` feature).
/// 6. **Score** — credits against the fastest route, sorted descending.
/// 7. **Record** — one [`AuditEntry`] (balanced vs fastest) in the ledger.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder].
pub struct RoutePlanner<P: Pathfinder = DijkstraPathfinder> {
    pub(crate) network:     RoadNetwork,
    pub(crate) config:      EngineConfig,
    pub(crate) pathfinder:  P,
    pub(crate) simulator:   TrafficSimulator,
    pub(crate) alpha_model: Box<dyn AlphaModel>,
    pub(crate) scorer:      GreenCreditScorer,
    pub(crate) remote:      Option<Box<dyn RemoteOptimizer>>,
    pub(crate) stats:       PlannerStats,
}

impl<P: Pathfinder> RoutePlanner<P> {
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &PlannerStats {
        &self.stats
    }

    pub fn alpha_model(&self) -> &dyn AlphaModel {
        self.alpha_model.as_ref()
    }

    /// Plan one request, drawing traffic from `rng`.
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidInput`] before any computation if the request is
    /// malformed; [`PlanError::NoPathFound`] if the destination is
    /// unreachable.  Remote failures are never returned.
    pub fn plan<R: RandomSource + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
        ledger: &mut AuditLedger,
    ) -> PlanResult<PlanResponse> {
        let started = Instant::now();
        let response = self.plan_inner(request, rng, ledger)?;
        self.stats.record(started.elapsed());
        Ok(response)
    }

    /// Plan one request locally against a caller-supplied snapshot.
    ///
    /// Bypasses the remote optimizer and the traffic simulator.
    pub fn plan_with_snapshot(
        &self,
        request: &PlanRequest,
        snapshot: &TrafficSnapshot,
        ledger: &mut AuditLedger,
    ) -> PlanResult<PlanResponse> {
        let started = Instant::now();
        let emission = self.validate(request)?;
        let response = self.plan_local(request, &emission, snapshot, PlanSource::Local, ledger)?;
        self.stats.record(started.elapsed());
        Ok(response)
    }

    // ── Pipeline stages ───────────────────────────────────────────────────

    fn plan_inner<R: RandomSource + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
        ledger: &mut AuditLedger,
    ) -> PlanResult<PlanResponse> {
        let emission = self.validate(request)?;

        let source = match &self.remote {
            None => PlanSource::Local,
            Some(remote) => {
                let outcome = remote
                    .optimize(&self.network, request)
                    .and_then(|plan| check_remote_plan(&self.network, request, &plan).map(|idx| (plan, idx)));
                match outcome {
                    Ok((plan, (fastest, balanced))) => {
                        self.stats.remote_plans.fetch_add(1, Ordering::Relaxed);
                        let alpha = AlphaPrediction {
                            model: "remote".into(),
                            ..AlphaPrediction::fixed(plan.alpha)
                        };
                        let (fastest, chosen) = (plan.routes[fastest].clone(), plan.routes[balanced].clone());
                        return Ok(self.finish(
                            request, plan.routes, &fastest, &chosen, alpha, PlanSource::Remote, None, ledger,
                        ));
                    }
                    Err(e) => {
                        warn!(error = %e, "remote optimizer failed; planning locally");
                        self.stats.fallbacks.fetch_add(1, Ordering::Relaxed);
                        PlanSource::LocalFallback
                    }
                }
            }
        };

        let snapshot = self.simulator.generate(
            &self.network,
            request.context.effective_congestion(),
            rng,
        );
        self.plan_local(request, &emission, &snapshot, source, ledger)
    }

    fn validate(&self, request: &PlanRequest) -> PlanResult<EmissionProfile> {
        for node in [request.origin, request.destination] {
            if !self.network.contains(node) {
                return Err(PlanError::InvalidInput(format!("unknown node {node}")));
            }
        }
        if request.origin == request.destination {
            return Err(PlanError::InvalidInput(format!(
                "origin and destination are the same node ({})",
                self.network.key(request.origin)
            )));
        }
        // Any finite non-negative weight is a valid balanced goal, whatever
        // range the heuristic itself predicts in.
        if let Some(alpha) = request.alpha_override {
            if !(alpha.is_finite() && alpha >= 0.0) {
                return Err(PlanError::InvalidInput(format!(
                    "alpha override must be finite and non-negative, got {alpha}"
                )));
            }
        }
        Ok(request.vehicle.resolve(&self.config.vehicle)?)
    }

    fn plan_local(
        &self,
        request: &PlanRequest,
        emission: &EmissionProfile,
        snapshot: &TrafficSnapshot,
        source: PlanSource,
        ledger: &mut AuditLedger,
    ) -> PlanResult<PlanResponse> {
        let alpha = match request.alpha_override {
            Some(a) => AlphaPrediction::fixed(a),
            None => {
                let ctx = AlphaContext::normalize(
                    &request.context,
                    &request.vehicle,
                    snapshot.incident_density(),
                    &self.config.alpha,
                );
                predict_alpha(self.alpha_model.as_ref(), &ctx)
            }
        };

        let inputs = CostInputs::new(emission, snapshot, GoalWeights::from(&self.config.routing));
        let [fastest, eco, balanced] = self.search_all(request, alpha.alpha, &inputs)?;

        let traffic = TrafficSummary {
            incident_density: snapshot.incident_density(),
            mean_congestion:  snapshot.mean_congestion(),
            area_congestion:  snapshot.area_congestion(),
        };
        let routes = vec![fastest.clone(), eco, balanced.clone()];
        Ok(self.finish(request, routes, &fastest, &balanced, alpha, source, Some(traffic), ledger))
    }

    /// Run the three goal searches over one set of cost inputs.
    fn search_all(
        &self,
        request: &PlanRequest,
        alpha: f64,
        inputs: &CostInputs<'_>,
    ) -> PlanResult<[RouteResult; 3]> {
        let search = |goal: RouteGoal| {
            self.pathfinder.find_route(&self.network, request.origin, request.destination, goal, inputs)
        };

        #[cfg(not(feature = "parallel"))]
        let (fastest, eco, balanced) = (
            search(RouteGoal::Fastest),
            search(RouteGoal::Eco),
            search(RouteGoal::Balanced { alpha }),
        );

        #[cfg(feature = "parallel")]
        let (fastest, (eco, balanced)) = rayon::join(
            || search(RouteGoal::Fastest),
            || rayon::join(|| search(RouteGoal::Eco), || search(RouteGoal::Balanced { alpha })),
        );

        Ok([fastest?, eco?, balanced?])
    }

    /// Score, record, and assemble the response.
    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        request: &PlanRequest,
        routes: Vec<RouteResult>,
        fastest: &RouteResult,
        chosen: &RouteResult,
        alpha: AlphaPrediction,
        source: PlanSource,
        traffic: Option<TrafficSummary>,
        ledger: &mut AuditLedger,
    ) -> PlanResponse {
        let routes = self.scorer.award(routes, request.vehicle.passenger_count);

        let audit = AuditEntry::from_routes(alpha.alpha, fastest, chosen, alpha.inference_ms(), Utc::now());
        let ledger_seq = ledger.append(audit.clone());

        info!(
            from = self.network.key(request.origin),
            to = self.network.key(request.destination),
            %source,
            alpha = alpha.alpha,
            carbon_saved_g = audit.carbon_saved_g,
            "plan ready"
        );

        PlanResponse { routes, audit, ledger_seq, source, alpha, traffic }
    }
}
