//! Road network representation and builder.
//!
//! # Data layout
//!
//! Links are stored in **Compressed Sparse Row (CSR)** order.  Given a
//! `NodeId n`, its outgoing links occupy the slice:
//!
//! ```text
//! links[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! and a `LinkId` is simply the position in that sorted array.  Iterating a
//! node's out-links is a contiguous scan, which is what the pathfinder's
//! relaxation loop wants.
//!
//! # Symmetry
//!
//! Every road is declared once and expanded into a mirrored pair by
//! [`expand_bidirectional`].  The builder only accepts declared roads, so a
//! built network always satisfies: for each link `a→b` there is a link `b→a`
//! with identical distance, time, eco flag, and emissions multiplier.
//!
//! # Spatial index
//!
//! Nodes that carry a position are bulk-loaded into an R-tree (via `rstar`)
//! so [`RoadNetwork::nearest_node`] can snap a map coordinate to the network.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use er_core::{GeoPoint, LinkId, NodeId};

use crate::{NetworkError, NetworkResult};

// ── Node / Link ───────────────────────────────────────────────────────────────

/// A labeled network node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Short unique key, e.g. `"A"`.
    pub key:   String,
    /// Human-readable label, e.g. `"Katraj (South)"`.
    pub label: String,
    pub pos:   Option<GeoPoint>,
}

/// A directed link between two nodes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub from:                 NodeId,
    pub to:                   NodeId,
    /// Length in kilometres.
    pub distance_km:          f64,
    /// Free-flow travel time in minutes.
    pub time_min:             f64,
    pub eco_priority:         bool,
    /// Emission scaling in `(0, 1]`; below 1 for low-emission bypasses.
    pub emissions_multiplier: f64,
}

impl Link {
    /// The same link in the opposite direction.
    #[inline]
    pub fn mirror(&self) -> Link {
        Link { from: self.to, to: self.from, ..*self }
    }
}

/// Double every declared link into its mirror, forward link first.
pub fn expand_bidirectional(links: &[Link]) -> Vec<Link> {
    let mut out = Vec::with_capacity(links.len() * 2);
    for link in links {
        out.push(*link);
        out.push(link.mirror());
    }
    out
}

/// Group links by source node, preserving input order within each group.
pub fn adjacency(links: &[Link]) -> FxHashMap<NodeId, Vec<Link>> {
    let mut map: FxHashMap<NodeId, Vec<Link>> = FxHashMap::default();
    for link in links {
        map.entry(link.from).or_default().push(*link);
    }
    map
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space; adequate for city scale.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Immutable road graph in CSR format.  Build with [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    nodes:          Vec<Node>,
    /// CSR row pointer; length `node_count + 1`.
    node_out_start: Vec<u32>,
    /// All directed links, sorted by source node.  Indexed by `LinkId`.
    links:          Vec<Link>,
    key_index:      FxHashMap<String, NodeId>,
    spatial_idx:    RTree<NodeEntry>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    // ── Node access ───────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&Node> {
        self.nodes.get(id.index()).ok_or(NetworkError::NodeNotFound(id))
    }

    /// Look up a node by its short key.
    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.key_index.get(key).copied()
    }

    /// Key of `id`, or `"?"` for ids outside the network.
    pub fn key(&self, id: NodeId) -> &str {
        self.nodes.get(id.index()).map_or("?", |n| n.key.as_str())
    }

    /// Render a node path as its keys, e.g. `["A", "C", "F"]`.
    pub fn path_keys(&self, path: &[NodeId]) -> Vec<&str> {
        path.iter().map(|&n| self.key(n)).collect()
    }

    // ── Link access ───────────────────────────────────────────────────────

    /// All directed links in CSR order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    /// Iterator over the `LinkId`s of all outgoing links from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_links(&self, node: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| LinkId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// First link `from → to` in CSR order, if any.
    pub fn find_link(&self, from: NodeId, to: NodeId) -> Option<LinkId> {
        if !self.contains(from) {
            return None;
        }
        self.out_links(from).find(|&l| self.links[l.index()].to == to)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest positioned node to `pos`; `None` if no node has a position.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// A road as declared by a data source, referring to nodes by key.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSpec {
    pub from:                 String,
    pub to:                   String,
    pub distance_km:          f64,
    pub time_min:             f64,
    pub eco_priority:         bool,
    pub emissions_multiplier: f64,
}

impl RoadSpec {
    /// An ordinary road with multiplier `1.0`.
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64, time_min: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance_km,
            time_min,
            eco_priority: false,
            emissions_multiplier: 1.0,
        }
    }

    /// Mark as an eco-priority bypass with the given emissions multiplier.
    pub fn eco(mut self, emissions_multiplier: f64) -> Self {
        self.eco_priority = true;
        self.emissions_multiplier = emissions_multiplier;
        self
    }
}

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes and roads may be added in any order; roads refer to nodes by key and
/// are resolved and validated in `build()`.
///
/// # Example
///
/// ```
/// use er_network::{RoadNetworkBuilder, RoadSpec};
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_node("A", "Katraj");
/// b.add_node("B", "Swargate");
/// b.add_road(RoadSpec::new("A", "B", 10.0, 5.0));
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.link_count(), 2); // bidirectional
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes: Vec<Node>,
    roads: Vec<RoadSpec>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a position and return its `NodeId`.
    pub fn add_node(&mut self, key: impl Into<String>, label: impl Into<String>) -> NodeId {
        self.push_node(Node { key: key.into(), label: label.into(), pos: None })
    }

    /// Add a node with a geographic position.
    pub fn add_node_at(&mut self, key: impl Into<String>, label: impl Into<String>, pos: GeoPoint) -> NodeId {
        self.push_node(Node { key: key.into(), label: label.into(), pos: Some(pos) })
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Declare a road; it is expanded into both directions at build time.
    pub fn add_road(&mut self, road: RoadSpec) -> &mut Self {
        self.roads.push(road);
        self
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.roads.len() }

    /// Validate all declarations and produce a [`RoadNetwork`].
    ///
    /// # Errors
    ///
    /// Fails fast on the first duplicate node key, invalid node position,
    /// road referencing an undeclared node, non-positive distance or time, or
    /// emissions multiplier outside `(0, 1]`.
    pub fn build(self) -> NetworkResult<RoadNetwork> {
        // ── Nodes ─────────────────────────────────────────────────────────
        let mut key_index: FxHashMap<String, NodeId> = FxHashMap::default();
        for (i, node) in self.nodes.iter().enumerate() {
            if node.key.trim().is_empty() {
                return Err(NetworkError::InvalidNode {
                    key:    node.key.clone(),
                    reason: "key must not be empty".into(),
                });
            }
            if let Some(pos) = node.pos {
                if !pos.is_valid() {
                    return Err(NetworkError::InvalidNode {
                        key:    node.key.clone(),
                        reason: format!("position {pos} out of range"),
                    });
                }
            }
            if key_index.insert(node.key.clone(), NodeId(i as u32)).is_some() {
                return Err(NetworkError::DuplicateNode(node.key.clone()));
            }
        }

        // ── Roads ─────────────────────────────────────────────────────────
        let mut declared = Vec::with_capacity(self.roads.len());
        for road in &self.roads {
            declared.push(resolve_road(road, &key_index)?);
        }

        // Stable sort keeps declaration order within each source node.
        let mut links = expand_bidirectional(&declared);
        links.sort_by_key(|l| l.from.0);

        let node_count = self.nodes.len();
        let mut node_out_start = vec![0u32; node_count + 1];
        for l in &links {
            node_out_start[l.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, links.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                n.pos.map(|p| NodeEntry { point: [p.lat, p.lon], id: NodeId(i as u32) })
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(RoadNetwork {
            nodes: self.nodes,
            node_out_start,
            links,
            key_index,
            spatial_idx,
        })
    }
}

fn resolve_road(road: &RoadSpec, key_index: &FxHashMap<String, NodeId>) -> NetworkResult<Link> {
    let lookup = |key: &str| {
        key_index.get(key).copied().ok_or_else(|| NetworkError::UndeclaredNode {
            from:    road.from.clone(),
            to:      road.to.clone(),
            missing: key.to_owned(),
        })
    };
    let from = lookup(&road.from)?;
    let to   = lookup(&road.to)?;

    let invalid = |reason: String| NetworkError::InvalidLink {
        from: road.from.clone(),
        to:   road.to.clone(),
        reason,
    };
    if from == to {
        return Err(invalid("self-loop".into()));
    }
    if !(road.distance_km.is_finite() && road.distance_km > 0.0) {
        return Err(invalid(format!("distance must be positive, got {}", road.distance_km)));
    }
    if !(road.time_min.is_finite() && road.time_min > 0.0) {
        return Err(invalid(format!("time must be positive, got {}", road.time_min)));
    }
    let m = road.emissions_multiplier;
    if !(m > 0.0 && m <= 1.0) {
        return Err(invalid(format!("emissions multiplier must be in (0, 1], got {m}")));
    }

    Ok(Link {
        from,
        to,
        distance_km:          road.distance_km,
        time_min:             road.time_min,
        eco_priority:         road.eco_priority,
        emissions_multiplier: m,
    })
}
