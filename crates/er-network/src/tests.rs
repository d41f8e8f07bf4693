//! Unit tests for er-network.
//!
//! Most tests use a hand-crafted network; the `sample` module checks the
//! built-in Pune network.

#[cfg(test)]
mod helpers {
    use crate::{RoadNetwork, RoadNetworkBuilder, RoadSpec};

    /// Square with one diagonal eco bypass.
    ///
    ///   P ── Q
    ///   │  ╲ │
    ///   S ── R
    ///
    /// Roads: P-Q, Q-R, P-S, S-R, P-R (eco ×0.5)
    pub fn square() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        b.add_node("P", "North-west");
        b.add_node("Q", "North-east");
        b.add_node("R", "South-east");
        b.add_node("S", "South-west");
        b.add_road(RoadSpec::new("P", "Q", 5.0, 3.0));
        b.add_road(RoadSpec::new("Q", "R", 5.0, 3.0));
        b.add_road(RoadSpec::new("P", "S", 4.0, 2.0));
        b.add_road(RoadSpec::new("S", "R", 4.0, 2.0));
        b.add_road(RoadSpec::new("P", "R", 9.0, 8.0).eco(0.5));
        b.build().unwrap()
    }
}

// ── Expansion & adjacency ─────────────────────────────────────────────────────

#[cfg(test)]
mod expansion {
    use er_core::NodeId;

    use crate::{adjacency, expand_bidirectional, Link};

    fn link(from: u32, to: u32) -> Link {
        Link {
            from:                 NodeId(from),
            to:                   NodeId(to),
            distance_km:          3.0,
            time_min:             2.0,
            eco_priority:         true,
            emissions_multiplier: 0.4,
        }
    }

    #[test]
    fn doubles_with_identical_attributes() {
        let declared = [link(0, 1), link(1, 2)];
        let expanded = expand_bidirectional(&declared);
        assert_eq!(expanded.len(), 4);
        for pair in expanded.chunks(2) {
            let (fwd, rev) = (pair[0], pair[1]);
            assert_eq!(fwd.from, rev.to);
            assert_eq!(fwd.to, rev.from);
            assert_eq!(fwd.distance_km, rev.distance_km);
            assert_eq!(fwd.time_min, rev.time_min);
            assert_eq!(fwd.eco_priority, rev.eco_priority);
            assert_eq!(fwd.emissions_multiplier, rev.emissions_multiplier);
        }
    }

    #[test]
    fn adjacency_groups_by_source() {
        let expanded = expand_bidirectional(&[link(0, 1), link(1, 2)]);
        let adj = adjacency(&expanded);
        assert_eq!(adj[&NodeId(0)].len(), 1);
        assert_eq!(adj[&NodeId(1)].len(), 2);
        assert_eq!(adj[&NodeId(2)].len(), 1);
        assert!(adj[&NodeId(1)].iter().all(|l| l.from == NodeId(1)));
    }
}

// ── Builder & validation ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use crate::{NetworkError, RoadNetworkBuilder, RoadSpec};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build().unwrap();
        assert!(net.is_empty());
        assert_eq!(net.link_count(), 0);
    }

    #[test]
    fn csr_out_links() {
        let net = super::helpers::square();
        let p = net.node_by_key("P").unwrap();
        let q = net.node_by_key("Q").unwrap();
        assert_eq!(net.link_count(), 10);
        assert_eq!(net.out_degree(p), 3); // Q, S, R
        assert_eq!(net.out_degree(q), 2);
        for l in net.out_links(p) {
            assert_eq!(net.link(l).from, p);
        }
    }

    #[test]
    fn every_link_has_mirror() {
        let net = super::helpers::square();
        for link in net.links() {
            let back = net.find_link(link.to, link.from).expect("mirror exists");
            let back = net.link(back);
            assert_eq!(back.distance_km, link.distance_km);
            assert_eq!(back.emissions_multiplier, link.emissions_multiplier);
        }
    }

    #[test]
    fn undeclared_node_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_node("A", "a");
        b.add_road(RoadSpec::new("A", "Z", 1.0, 1.0));
        let err = b.build().err().unwrap();
        assert!(matches!(err, NetworkError::UndeclaredNode { ref missing, .. } if missing == "Z"));
    }

    #[test]
    fn non_positive_distance_or_time_rejected() {
        for (d, t) in [(0.0, 1.0), (1.0, 0.0), (-2.0, 1.0), (1.0, f64::NAN)] {
            let mut b = RoadNetworkBuilder::new();
            b.add_node("A", "a");
            b.add_node("B", "b");
            b.add_road(RoadSpec::new("A", "B", d, t));
            assert!(matches!(b.build(), Err(NetworkError::InvalidLink { .. })), "({d}, {t})");
        }
    }

    #[test]
    fn multiplier_out_of_range_rejected() {
        for m in [0.0, 1.5, -0.1] {
            let mut b = RoadNetworkBuilder::new();
            b.add_node("A", "a");
            b.add_node("B", "b");
            b.add_road(RoadSpec::new("A", "B", 1.0, 1.0).eco(m));
            assert!(matches!(b.build(), Err(NetworkError::InvalidLink { .. })), "{m}");
        }
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_node("A", "first");
        b.add_node("A", "second");
        assert!(matches!(b.build(), Err(NetworkError::DuplicateNode(_))));
    }

    #[test]
    fn key_lookup_and_path_keys() {
        let net = super::helpers::square();
        let p = net.node_by_key("P").unwrap();
        let r = net.node_by_key("R").unwrap();
        assert_eq!(net.key(p), "P");
        assert_eq!(net.path_keys(&[p, r]), ["P", "R"]);
        assert!(net.node_by_key("X").is_none());
        assert!(net.node(er_core::NodeId(99)).is_err());
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use er_core::GeoPoint;

    use crate::{pune_network, RoadNetworkBuilder};

    #[test]
    fn snap_exact_position() {
        let net = pune_network().unwrap();
        let swargate = net.nearest_node(GeoPoint::new(18.5018, 73.8636)).unwrap();
        assert_eq!(net.key(swargate), "B");
    }

    #[test]
    fn snap_nearby() {
        let net = pune_network().unwrap();
        let near_wakad = net.nearest_node(GeoPoint::new(18.60, 73.77)).unwrap();
        assert_eq!(net.key(near_wakad), "I");
    }

    #[test]
    fn unpositioned_network_returns_none() {
        let net = super::helpers::square();
        assert!(net.nearest_node(GeoPoint::new(0.0, 0.0)).is_none());
        assert!(RoadNetworkBuilder::new().build().unwrap().nearest_node(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Sample network ────────────────────────────────────────────────────────────

#[cfg(test)]
mod sample {
    use crate::pune_network;

    #[test]
    fn dimensions() {
        let net = pune_network().unwrap();
        assert_eq!(net.node_count(), 10);
        assert_eq!(net.link_count(), 32);
    }

    #[test]
    fn eco_bypasses_present() {
        let net = pune_network().unwrap();
        let f = net.node_by_key("F").unwrap();
        let h = net.node_by_key("H").unwrap();
        let fh = net.link(net.find_link(f, h).unwrap());
        assert!(fh.eco_priority);
        assert_eq!(fh.emissions_multiplier, 0.05);

        let lowest = net
            .links()
            .iter()
            .map(|l| l.emissions_multiplier)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(lowest, 0.05);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_network_csv, load_network_readers, NetworkError};

    const NODES: &str = "\
key,label,lat,lon
A,Katraj (South),18.4088,73.8578
B,Swargate,,
C,Deccan Gymkhana,18.5204,73.8567
";

    const LINKS: &str = "\
from,to,distance_km,time_min,eco_priority,emissions_multiplier
A,B,10,5,false,
A,C,12,6,0,1.0
B,C,8,4,true,0.5
";

    #[test]
    fn loads_valid_files() {
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(LINKS)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.link_count(), 6);

        let b = net.node_by_key("B").unwrap();
        let c = net.node_by_key("C").unwrap();
        let bc = net.link(net.find_link(b, c).unwrap());
        assert!(bc.eco_priority);
        assert_eq!(bc.emissions_multiplier, 0.5);
        assert!(net.node(b).unwrap().pos.is_none());
    }

    #[test]
    fn default_multiplier_is_one() {
        let net = load_network_readers(Cursor::new(NODES), Cursor::new(LINKS)).unwrap();
        let a = net.node_by_key("A").unwrap();
        let b = net.node_by_key("B").unwrap();
        assert_eq!(net.link(net.find_link(a, b).unwrap()).emissions_multiplier, 1.0);
    }

    #[test]
    fn bad_flag_is_parse_error() {
        let links = "from,to,distance_km,time_min,eco_priority,emissions_multiplier\nA,B,1,1,maybe,1\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(links)).err().unwrap();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn half_position_is_parse_error() {
        let nodes = "key,label,lat,lon\nA,a,18.4,\n";
        let links = "from,to,distance_km,time_min,eco_priority,emissions_multiplier\n";
        let err = load_network_readers(Cursor::new(nodes), Cursor::new(links)).err().unwrap();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn validation_applies_to_loaded_links() {
        let links = "from,to,distance_km,time_min,eco_priority,emissions_multiplier\nA,Q,1,1,false,1\n";
        let err = load_network_readers(Cursor::new(NODES), Cursor::new(links)).err().unwrap();
        assert!(matches!(err, NetworkError::UndeclaredNode { .. }));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let nodes_path = dir.path().join("nodes.csv");
        let links_path = dir.path().join("links.csv");
        std::fs::write(&nodes_path, NODES).unwrap();
        std::fs::write(&links_path, LINKS).unwrap();
        let net = load_network_csv(&nodes_path, &links_path).unwrap();
        assert_eq!(net.node_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_network_csv(&dir.path().join("nope.csv"), &dir.path().join("nope2.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
