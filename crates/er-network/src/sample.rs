//! Built-in 10-node demo network.
//!
//! Ten landmarks along the Katraj → Hinjawadi corridor in Pune.  The main
//! arteries are ordinary roads; four eco-priority bypasses carry reduced
//! emissions multipliers, the F–H bypass (×0.05) being the cleanest.
//!
//! D–G is declared twice: once as a short ordinary connector and once as a
//! longer eco bypass, so the pair has parallel links in each direction.

use er_core::GeoPoint;

use crate::{NetworkResult, RoadNetwork, RoadNetworkBuilder, RoadSpec};

/// Build the Pune sample network (nodes `A`–`J`, 16 declared roads).
pub fn pune_network() -> NetworkResult<RoadNetwork> {
    let mut b = RoadNetworkBuilder::new();

    b.add_node_at("A", "Katraj (South)",    GeoPoint::new(18.4088, 73.8578));
    b.add_node_at("B", "Swargate",          GeoPoint::new(18.5018, 73.8636));
    b.add_node_at("C", "Deccan Gymkhana",   GeoPoint::new(18.5204, 73.8567));
    b.add_node_at("D", "Shivajinagar",      GeoPoint::new(18.5304, 73.8567));
    b.add_node_at("E", "University Circle", GeoPoint::new(18.5404, 73.8267));
    b.add_node_at("F", "Kothrud Bypass",    GeoPoint::new(18.5074, 73.8077));
    b.add_node_at("G", "Balewadi Stadium",  GeoPoint::new(18.5644, 73.7749));
    b.add_node_at("H", "Baner",             GeoPoint::new(18.5590, 73.7770));
    b.add_node_at("I", "Wakad",             GeoPoint::new(18.5974, 73.7662));
    b.add_node_at("J", "Hinjawadi Ph 1",    GeoPoint::new(18.5912, 73.7394));

    // Main arteries: (from, to, km, min)
    b.add_road(RoadSpec::new("A", "B", 10.0, 5.0));
    b.add_road(RoadSpec::new("A", "C", 12.0, 6.0));
    b.add_road(RoadSpec::new("B", "D", 10.0, 5.0));
    b.add_road(RoadSpec::new("C", "D", 8.0, 4.0));
    b.add_road(RoadSpec::new("D", "E", 5.0, 2.0));
    b.add_road(RoadSpec::new("E", "J", 10.0, 5.0));
    b.add_road(RoadSpec::new("I", "J", 8.0, 4.0));

    // Eco bypasses.
    b.add_road(RoadSpec::new("C", "F", 8.0, 4.0).eco(0.5));
    b.add_road(RoadSpec::new("F", "H", 15.0, 7.0).eco(0.05));
    b.add_road(RoadSpec::new("E", "I", 10.0, 5.0).eco(0.4));
    b.add_road(RoadSpec::new("G", "D", 12.0, 5.0).eco(0.7));

    // Connectors.
    b.add_road(RoadSpec::new("D", "G", 7.0, 3.0));
    b.add_road(RoadSpec::new("G", "H", 5.0, 2.0));
    b.add_road(RoadSpec::new("H", "I", 8.0, 4.0));
    b.add_road(RoadSpec::new("D", "F", 12.0, 6.0));
    b.add_road(RoadSpec::new("B", "E", 14.0, 7.0));

    b.build()
}
