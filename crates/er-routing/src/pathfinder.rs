//! Pathfinder trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `er-planner` calls path search through the [`Pathfinder`] trait, so an
//! application can substitute A* or a precomputed hierarchy without touching
//! the request pipeline.  The default [`DijkstraPathfinder`] uses a zero
//! heuristic: edge weights mix grams and minutes, so no admissible distance
//! bound exists for the eco and balanced goals.
//!
//! # Cost units
//!
//! Search weights are dimensionless `f64`s produced by [`GoalWeights`].  The
//! totals on the returned [`RouteResult`] are re-accumulated from
//! [`evaluate`] in physical units, independent of the goal.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use er_core::{EmissionProfile, LinkId, NodeId};
use er_network::RoadNetwork;
use er_traffic::TrafficSnapshot;

use crate::{evaluate, GoalWeights, RouteGoal, RouteResult, RouteVariant, RoutingError, RoutingResult};

// ── CostInputs ────────────────────────────────────────────────────────────────

/// Everything a search needs besides the graph and the goal.
///
/// One `CostInputs` is built per request and reused for all three goals, which
/// is what keeps their totals comparable.
#[derive(Copy, Clone, Debug)]
pub struct CostInputs<'a> {
    pub emission: &'a EmissionProfile,
    pub snapshot: &'a TrafficSnapshot,
    pub weights:  GoalWeights,
}

impl<'a> CostInputs<'a> {
    pub fn new(emission: &'a EmissionProfile, snapshot: &'a TrafficSnapshot, weights: GoalWeights) -> Self {
        Self { emission, snapshot, weights }
    }

    #[inline]
    fn weight(&self, network: &RoadNetwork, link: LinkId, goal: RouteGoal) -> f64 {
        let cost = evaluate(
            network.link(link),
            self.emission,
            self.snapshot.congestion(link),
            self.snapshot.incident_density(),
        );
        self.weights.weight(goal, cost)
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the planner can run the three
/// goal searches concurrently under the `parallel` feature.
pub trait Pathfinder: Send + Sync {
    /// Least-weight route from `from` to `to` under `goal`.
    ///
    /// `green_credits` on the result is always `0.0`; scoring happens after
    /// all three variants are known.
    fn find_route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        goal: RouteGoal,
        inputs: &CostInputs<'_>,
    ) -> RoutingResult<RouteResult>;
}

// ── DijkstraPathfinder ────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR road graph with a binary-heap frontier.
///
/// Ties on cumulative weight are broken by the lower `NodeId`, and a node is
/// only relabelled on a strictly lower weight, so equal-cost alternatives
/// resolve the same way on every run.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPathfinder;

impl Pathfinder for DijkstraPathfinder {
    fn find_route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        goal: RouteGoal,
        inputs: &CostInputs<'_>,
    ) -> RoutingResult<RouteResult> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(RoutingError::NodeNotFound(node));
            }
        }
        if !inputs.snapshot.matches(network) {
            return Err(RoutingError::SnapshotMismatch {
                snapshot: inputs.snapshot.link_count(),
                network:  network.link_count(),
            });
        }

        let prev_link = dijkstra(network, from, to, goal, inputs)?;
        let route = reconstruct(network, &prev_link, from, to, goal, inputs);
        debug!(
            goal = %goal,
            from = network.key(from),
            to = network.key(to),
            hops = route.links.len(),
            time_min = route.total_time_min,
            emissions_g = route.total_emissions_g,
            "route found"
        );
        Ok(route)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key: a totally ordered `f64`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Weight(f64);

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Returns `prev_link[v]`, the link that reached `v` on the best path.
fn dijkstra(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    goal: RouteGoal,
    inputs: &CostInputs<'_>,
) -> RoutingResult<Vec<LinkId>> {
    let n = network.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_link = vec![LinkId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as a min-heap.
    let mut heap: BinaryHeap<Reverse<(Weight, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Weight(0.0), from)));

    while let Some(Reverse((Weight(cost), node))) = heap.pop() {
        if node == to {
            return Ok(prev_link);
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for link in network.out_links(node) {
            let neighbor = network.link(link).to;
            let new_cost = cost + inputs.weight(network, link, goal);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_link[neighbor.index()] = link;
                heap.push(Reverse((Weight(new_cost), neighbor)));
            }
        }
    }

    Err(RoutingError::NoPathFound { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_link: &[LinkId],
    from: NodeId,
    to: NodeId,
    goal: RouteGoal,
    inputs: &CostInputs<'_>,
) -> RouteResult {
    let mut links = Vec::new();
    let mut cur = to;
    while cur != from {
        let l = prev_link[cur.index()];
        if l == LinkId::INVALID {
            break;
        }
        links.push(l);
        cur = network.link(l).from;
    }
    links.reverse();

    let mut path = Vec::with_capacity(links.len() + 1);
    path.push(from);

    let mut total_time_min    = 0.0;
    let mut total_emissions_g = 0.0;
    let mut total_distance_km = 0.0;
    for &l in &links {
        let link = network.link(l);
        let cost = evaluate(
            link,
            inputs.emission,
            inputs.snapshot.congestion(l),
            inputs.snapshot.incident_density(),
        );
        total_time_min    += cost.travel_time_min;
        total_emissions_g += cost.emissions_g;
        total_distance_km += link.distance_km;
        path.push(link.to);
    }

    RouteResult {
        variant: RouteVariant::from(goal),
        path,
        links,
        total_time_min,
        total_emissions_g,
        total_distance_km,
        green_credits: 0.0,
    }
}
