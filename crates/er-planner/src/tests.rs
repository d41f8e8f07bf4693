//! Unit tests for er-planner.
//!
//! Most tests plan A → J on the built-in Pune network.

#[cfg(test)]
mod helpers {
    use er_core::{FuelType, NodeId, TripContext, VehicleProfile};
    use er_network::{pune_network, RoadNetwork};
    use er_routing::RouteResult;

    use crate::{PlanRequest, PlannerBuilder, RoutePlanner};

    pub fn planner() -> RoutePlanner {
        PlannerBuilder::new(pune_network().unwrap()).build().unwrap()
    }

    pub fn node(net: &RoadNetwork, key: &str) -> NodeId {
        net.node_by_key(key).unwrap()
    }

    /// A → J, single-occupant petrol car at 15 km/L, 8:00 Tuesday, CF 2.5.
    pub fn a_to_j(net: &RoadNetwork) -> PlanRequest {
        PlanRequest::new(
            node(net, "A"),
            node(net, "J"),
            VehicleProfile::new(FuelType::Petrol, 15.0, 1),
            TripContext::new(8.0, 1, 2.5, 0.5),
        )
    }

    pub fn assert_valid(net: &RoadNetwork, route: &RouteResult, from: NodeId, to: NodeId) {
        assert_eq!(route.origin(), Some(from));
        assert_eq!(route.destination(), Some(to));
        assert_eq!(route.path.len(), route.links.len() + 1);
        for (i, &l) in route.links.iter().enumerate() {
            let link = net.link(l);
            assert_eq!(link.from, route.path[i]);
            assert_eq!(link.to, route.path[i + 1]);
        }
    }

    pub fn uses_link(net: &RoadNetwork, route: &RouteResult, a: &str, b: &str) -> bool {
        let (a, b) = (node(net, a), node(net, b));
        route.links.iter().any(|&l| {
            let link = net.link(l);
            (link.from == a && link.to == b) || (link.from == b && link.to == a)
        })
    }
}

// ── Local planning ────────────────────────────────────────────────────────────

#[cfg(test)]
mod local {
    use er_core::{FuelType, SeededRandom, VehicleProfile};
    use er_output::AuditLedger;
    use er_routing::RouteVariant;
    use er_traffic::TrafficSnapshot;

    use super::helpers::{a_to_j, assert_valid, planner, uses_link};
    use crate::PlanSource;

    #[test]
    fn three_valid_variants_sorted_by_credits() {
        let p = planner();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        for seed in 0..10 {
            let resp = p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
            assert_eq!(resp.source, PlanSource::Local);
            assert_eq!(resp.routes.len(), 3);
            for r in &resp.routes {
                assert_valid(p.network(), r, req.origin, req.destination);
                assert!(r.green_credits >= 0.0);
            }
            assert!(resp.routes.windows(2).all(|w| w[0].green_credits >= w[1].green_credits));
            assert_eq!(resp.route(RouteVariant::Fastest).unwrap().green_credits, 0.0);
            assert!(resp.traffic.is_some());
        }
        assert_eq!(ledger.len(), 10);
        assert_eq!(p.stats().requests(), 10);
    }

    #[test]
    fn fastest_avoids_bypass_under_any_jitter() {
        let p = planner();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        for seed in 0..20 {
            let resp = p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
            let fastest = resp.route(RouteVariant::Fastest).unwrap();
            assert!(!uses_link(p.network(), fastest, "F", "H"));
        }
    }

    #[test]
    fn balanced_lies_between_eco_and_fastest() {
        let p = planner();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        for seed in 0..20 {
            let resp = p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
            let f = resp.route(RouteVariant::Fastest).unwrap().total_emissions_g;
            let e = resp.route(RouteVariant::Eco).unwrap().total_emissions_g;
            let b = resp.route(RouteVariant::Balanced).unwrap().total_emissions_g;
            assert!(e <= b + 1e-6 && b <= f + 1e-6, "eco {e}, balanced {b}, fastest {f}");
        }
    }

    #[test]
    fn eco_takes_reduced_emission_links() {
        let p = planner();
        let req = a_to_j(p.network());
        let snap = TrafficSnapshot::uniform(p.network(), 2.5, 0.3);
        let mut ledger = AuditLedger::new();

        let resp = p.plan_with_snapshot(&req, &snap, &mut ledger).unwrap();
        let eco = resp.route(RouteVariant::Eco).unwrap();
        assert!(eco.links.iter().any(|&l| p.network().link(l).emissions_multiplier < 1.0));
        assert_eq!(p.network().path_keys(&eco.path), vec!["A", "C", "F", "H", "I", "J"]);
        assert!(uses_link(p.network(), eco, "F", "H"));

        let traffic = resp.traffic.unwrap();
        assert_eq!(traffic.incident_density, 0.3);
        assert_eq!(traffic.mean_congestion, 2.5);
    }

    #[test]
    fn eco_uses_reduced_emission_link_under_any_jitter() {
        let p = planner();
        let req = a_to_j(p.network());
        assert_eq!(req.vehicle.efficiency_rating, FuelType::Petrol.typical_efficiency());
        let mut ledger = AuditLedger::new();

        for seed in 0..50 {
            let resp = p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
            let eco = resp.route(RouteVariant::Eco).unwrap();
            assert!(
                eco.links.iter().any(|&l| p.network().link(l).emissions_multiplier < 1.0),
                "seed {seed}: eco path {:?}",
                p.network().path_keys(&eco.path)
            );
        }
    }

    #[test]
    fn planning_time_accumulates_over_successful_requests() {
        let p = planner();
        assert_eq!(p.stats().mean_planning_time(), None);
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        for seed in 0..3 {
            p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
        }
        let total = p.stats().total_planning_time();
        let mean = p.stats().mean_planning_time().unwrap();
        assert_eq!(p.stats().requests(), 3);
        assert!(mean <= total);
        assert!(mean.as_nanos() * 3 <= total.as_nanos());

        let bad = a_to_j(p.network()).with_alpha(f64::NAN);
        assert!(p.plan(&bad, &mut SeededRandom::new(0), &mut ledger).is_err());
        assert_eq!(p.stats().requests(), 3);
        assert_eq!(p.stats().total_planning_time(), total);
    }

    #[test]
    fn electric_routes_emit_nothing() {
        let p = planner();
        let mut req = a_to_j(p.network());
        req.vehicle = VehicleProfile::typical(FuelType::Electric);
        let mut ledger = AuditLedger::new();

        let resp = p.plan(&req, &mut SeededRandom::new(3), &mut ledger).unwrap();
        for r in &resp.routes {
            assert_eq!(r.total_emissions_g, 0.0);
            assert_eq!(r.green_credits, 0.0);
        }
        assert_eq!(resp.alpha.alpha, 0.05);
        assert_eq!(ledger.cumulative_carbon_saved(), 0.0);
    }

    #[test]
    fn same_seed_same_routes() {
        let p1 = planner();
        let p2 = planner();
        let req = a_to_j(p1.network());
        let (mut l1, mut l2) = (AuditLedger::new(), AuditLedger::new());

        let r1 = p1.plan(&req, &mut SeededRandom::new(42), &mut l1).unwrap();
        let r2 = p2.plan(&req, &mut SeededRandom::new(42), &mut l2).unwrap();
        assert_eq!(
            serde_json::to_string(&r1.routes).unwrap(),
            serde_json::to_string(&r2.routes).unwrap()
        );
        assert_eq!(r1.alpha.alpha, r2.alpha.alpha);
        assert_eq!(r1.traffic, r2.traffic);
    }

    #[test]
    fn ledger_accumulates_positive_savings() {
        let p = planner();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        let mut expected = 0.0;
        for seed in 0..8 {
            let resp = p.plan(&req, &mut SeededRandom::new(seed), &mut ledger).unwrap();
            assert_eq!(resp.ledger_seq, seed as usize);
            let fastest = resp.route(RouteVariant::Fastest).unwrap();
            let balanced = resp.route(RouteVariant::Balanced).unwrap();
            assert_eq!(resp.audit.fastest_emissions_g, fastest.total_emissions_g);
            assert_eq!(resp.audit.chosen_emissions_g, balanced.total_emissions_g);
            expected += (fastest.total_emissions_g - balanced.total_emissions_g).max(0.0);
        }
        assert_eq!(ledger.len(), 8);
        assert!((ledger.cumulative_carbon_saved() - expected).abs() < 1e-9);
    }

    #[test]
    fn alpha_override_skips_model() {
        let p = planner();
        let req = a_to_j(p.network()).with_alpha(0.3);
        let mut ledger = AuditLedger::new();

        let resp = p.plan(&req, &mut SeededRandom::new(1), &mut ledger).unwrap();
        assert_eq!(resp.alpha.alpha, 0.3);
        assert_eq!(resp.alpha.model, "override");
        assert_eq!(resp.audit.alpha, 0.3);
    }

    #[test]
    fn heuristic_alpha_reflects_context() {
        let p = planner();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        let resp = p.plan(&req, &mut SeededRandom::new(1), &mut ledger).unwrap();
        assert_eq!(resp.alpha.model, "graph");
        assert!((0.05..=0.6).contains(&resp.alpha.alpha));
    }
}

// ── Remote optimizer ──────────────────────────────────────────────────────────

#[cfg(test)]
mod remote {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use er_core::{SeededRandom, SequenceRandom, VehicleConfig};
    use er_network::{pune_network, RoadNetwork};
    use er_output::AuditLedger;
    use er_routing::{CostInputs, DijkstraPathfinder, GoalWeights, Pathfinder, RouteGoal, RouteVariant};
    use er_traffic::TrafficSnapshot;

    use super::helpers::a_to_j;
    use crate::{
        OfflineOptimizer, PlanRequest, PlanSource, PlannerBuilder, RemoteError, RemoteOptimizer,
        RemotePlan,
    };

    /// Plans at free flow with Dijkstra, as a well-behaved service would.
    struct FreeFlowRemote {
        calls:        Arc<AtomicUsize>,
        drop_balanced: bool,
    }

    impl RemoteOptimizer for FreeFlowRemote {
        fn optimize(&self, network: &RoadNetwork, request: &PlanRequest) -> Result<RemotePlan, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let em = request
                .vehicle
                .resolve(&VehicleConfig::default())
                .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
            let snap = TrafficSnapshot::free_flow(network);
            let inputs = CostInputs::new(&em, &snap, GoalWeights::default());
            let mut routes = [RouteGoal::Fastest, RouteGoal::Eco, RouteGoal::Balanced { alpha: 0.2 }]
                .into_iter()
                .map(|g| DijkstraPathfinder.find_route(network, request.origin, request.destination, g, &inputs))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
            if self.drop_balanced {
                routes.retain(|r| r.variant != RouteVariant::Balanced);
            }
            Ok(RemotePlan { routes, alpha: 0.2 })
        }
    }

    fn remote(drop_balanced: bool) -> (FreeFlowRemote, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (FreeFlowRemote { calls: calls.clone(), drop_balanced }, calls)
    }

    #[test]
    fn offline_remote_falls_back() {
        let p = PlannerBuilder::new(pune_network().unwrap())
            .remote(OfflineOptimizer)
            .build()
            .unwrap();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        let resp = p.plan(&req, &mut SeededRandom::new(9), &mut ledger).unwrap();
        assert_eq!(resp.source, PlanSource::LocalFallback);
        assert_eq!(resp.routes.len(), 3);
        assert_eq!(p.stats().fallbacks(), 1);
        assert_eq!(p.stats().requests(), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn fallback_matches_local_plan() {
        let local = PlannerBuilder::new(pune_network().unwrap()).build().unwrap();
        let fallback = PlannerBuilder::new(pune_network().unwrap())
            .remote(OfflineOptimizer)
            .build()
            .unwrap();
        let req = a_to_j(local.network());
        let mut ledger = AuditLedger::new();

        let a = local.plan(&req, &mut SeededRandom::new(5), &mut ledger).unwrap();
        let b = fallback.plan(&req, &mut SeededRandom::new(5), &mut ledger).unwrap();
        assert_eq!(a.routes, b.routes);
    }

    #[test]
    fn remote_success_is_scored_and_recorded() {
        let (r, calls) = remote(false);
        let p = PlannerBuilder::new(pune_network().unwrap()).remote(r).build().unwrap();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();
        let mut rng = SequenceRandom::constant(0.5);

        let resp = p.plan(&req, &mut rng, &mut ledger).unwrap();
        assert_eq!(resp.source, PlanSource::Remote);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(rng.draws(), 0);
        assert!(resp.traffic.is_none());
        assert_eq!(resp.alpha.alpha, 0.2);
        assert_eq!(resp.alpha.model, "remote");
        assert!(resp.routes.windows(2).all(|w| w[0].green_credits >= w[1].green_credits));
        assert_eq!(ledger.len(), 1);
        assert_eq!(p.stats().remote_plans(), 1);
        assert_eq!(p.stats().fallbacks(), 0);
    }

    #[test]
    fn incomplete_remote_plan_falls_back() {
        let (r, calls) = remote(true);
        let p = PlannerBuilder::new(pune_network().unwrap()).remote(r).build().unwrap();
        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();

        let resp = p.plan(&req, &mut SeededRandom::new(2), &mut ledger).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resp.source, PlanSource::LocalFallback);
        assert!(resp.route(RouteVariant::Balanced).is_some());
    }

    #[test]
    fn invalid_input_never_reaches_remote() {
        let (r, calls) = remote(false);
        let p = PlannerBuilder::new(pune_network().unwrap()).remote(r).build().unwrap();
        let mut req = a_to_j(p.network());
        req.destination = req.origin;
        let mut ledger = AuditLedger::new();

        assert!(p.plan(&req, &mut SeededRandom::new(0), &mut ledger).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(ledger.is_empty());
    }
}

// ── Input validation and errors ───────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use er_core::{EngineConfig, FuelType, NodeId, SeededRandom, TripContext, VehicleProfile};
    use er_network::{RoadNetworkBuilder, RoadSpec};
    use er_output::AuditLedger;

    use super::helpers::{a_to_j, planner};
    use crate::{PlanError, PlanRequest, PlannerBuilder};

    fn rejects(mutate: impl FnOnce(&mut PlanRequest)) {
        let p = planner();
        let mut req = a_to_j(p.network());
        mutate(&mut req);
        let mut ledger = AuditLedger::new();
        let err = p.plan(&req, &mut SeededRandom::new(0), &mut ledger).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)), "{err}");
        assert!(ledger.is_empty());
        assert_eq!(p.stats().requests(), 0);
    }

    #[test]
    fn same_origin_and_destination() {
        rejects(|r| r.destination = r.origin);
    }

    #[test]
    fn unknown_node() {
        rejects(|r| r.destination = NodeId(99));
        rejects(|r| r.origin = NodeId::INVALID);
    }

    #[test]
    fn bad_vehicle() {
        rejects(|r| r.vehicle = VehicleProfile::new(FuelType::Petrol, 0.0, 1));
        rejects(|r| r.vehicle = VehicleProfile::new(FuelType::Diesel, -3.0, 1));
        rejects(|r| r.vehicle = VehicleProfile::new(FuelType::Petrol, 15.0, 0));
    }

    #[test]
    fn bad_alpha_override() {
        rejects(|r| r.alpha_override = Some(f64::NAN));
        rejects(|r| r.alpha_override = Some(f64::INFINITY));
        rejects(|r| r.alpha_override = Some(-0.1));
    }

    #[test]
    fn override_outside_heuristic_range_is_accepted() {
        let p = planner();
        assert_eq!(p.alpha_model().bounds(), (0.05, 0.6));
        let mut ledger = AuditLedger::new();

        for alpha in [0.0, 0.1, 1.0, 2.0, 5.0] {
            let req = a_to_j(p.network()).with_alpha(alpha);
            let resp = p.plan(&req, &mut SeededRandom::new(0), &mut ledger).unwrap();
            assert_eq!(resp.alpha.alpha, alpha);
            assert_eq!(resp.audit.alpha, alpha);
        }
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn unreachable_destination() {
        let mut b = RoadNetworkBuilder::new();
        let x = b.add_node("X", "Depot");
        b.add_node("Y", "Yard");
        let z = b.add_node("Z", "Island");
        b.add_road(RoadSpec::new("X", "Y", 3.0, 2.0));
        let p = PlannerBuilder::new(b.build().unwrap()).build().unwrap();

        let req = PlanRequest::new(x, z, VehicleProfile::typical(FuelType::Cng), TripContext::default());
        let mut ledger = AuditLedger::new();
        let err = p.plan(&req, &mut SeededRandom::new(0), &mut ledger).unwrap_err();
        assert!(matches!(err, PlanError::NoPathFound { from, to } if from == x && to == z));
        assert!(ledger.is_empty());
    }

    #[test]
    fn builder_rejects_bad_config() {
        let mut config = EngineConfig::default();
        config.routing.time_mult = 0.0;
        let result = PlannerBuilder::new(er_network::pune_network().unwrap()).config(config).build();
        assert!(matches!(result.err(), Some(PlanError::Config(_))));
    }

    #[test]
    fn builder_rejects_empty_network() {
        let empty = RoadNetworkBuilder::new().build().unwrap();
        let result = PlannerBuilder::new(empty).build();
        assert!(matches!(result.err(), Some(PlanError::Config(_))));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod configured {
    use er_core::{AlphaModelKind, CreditScheme, EngineConfig, SeededRandom};
    use er_network::pune_network;
    use er_output::AuditLedger;
    use er_routing::RouteVariant;

    use super::helpers::a_to_j;
    use crate::PlannerBuilder;

    #[test]
    fn traffic_state_model_selected_by_config() {
        let mut config = EngineConfig::default();
        config.alpha.model = AlphaModelKind::TrafficState;
        let p = PlannerBuilder::new(pune_network().unwrap()).config(config).build().unwrap();
        assert_eq!(p.alpha_model().name(), "traffic_state");

        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();
        let resp = p.plan(&req, &mut SeededRandom::new(4), &mut ledger).unwrap();
        assert!((0.1..=2.0).contains(&resp.alpha.alpha));
        let resp = p.plan(&req.clone().with_alpha(1.5), &mut SeededRandom::new(4), &mut ledger).unwrap();
        assert_eq!(resp.alpha.alpha, 1.5);
    }

    #[test]
    fn distance_carbon_scheme_from_json() {
        let config = EngineConfig::from_json_str(r#"{ "credits": { "scheme": "distance_carbon" } }"#).unwrap();
        assert_eq!(config.credits.scheme, CreditScheme::DistanceCarbon);
        let p = PlannerBuilder::new(pune_network().unwrap()).config(config).build().unwrap();

        let req = a_to_j(p.network());
        let mut ledger = AuditLedger::new();
        let resp = p.plan(&req, &mut SeededRandom::new(6), &mut ledger).unwrap();
        let eco = resp.route(RouteVariant::Eco).unwrap();
        assert!(eco.green_credits >= eco.total_distance_km * 0.5 - 1e-9);
        assert_eq!(resp.route(RouteVariant::Fastest).unwrap().green_credits, 0.0);
    }
}
