//! CSV network loader.
//!
//! # CSV format
//!
//! Two files.  Nodes, one row per node (`lat`/`lon` may be left empty):
//!
//! ```csv
//! key,label,lat,lon
//! A,Katraj (South),18.4088,73.8578
//! B,Swargate,,
//! ```
//!
//! Links, one row per **declared** road (each row becomes a mirrored pair):
//!
//! ```csv
//! from,to,distance_km,time_min,eco_priority,emissions_multiplier
//! A,B,10,5,false,1.0
//! C,F,8,4,true,0.5
//! ```
//!
//! `eco_priority` accepts `true`/`false`/`1`/`0`; `emissions_multiplier`
//! defaults to `1.0` when empty.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use er_core::GeoPoint;

use crate::{NetworkError, NetworkResult, RoadNetwork, RoadNetworkBuilder, RoadSpec};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    key:   String,
    label: String,
    lat:   Option<f32>,
    lon:   Option<f32>,
}

#[derive(Deserialize)]
struct LinkRecord {
    from:                 String,
    to:                   String,
    distance_km:          f64,
    time_min:             f64,
    eco_priority:         String,
    emissions_multiplier: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a network from a node CSV and a link CSV.
pub fn load_network_csv(nodes_path: &Path, links_path: &Path) -> NetworkResult<RoadNetwork> {
    let nodes = std::fs::File::open(nodes_path)?;
    let links = std::fs::File::open(links_path)?;
    let net = load_network_readers(nodes, links)?;
    info!(
        nodes = net.node_count(),
        links = net.link_count(),
        source = %nodes_path.display(),
        "road network loaded"
    );
    Ok(net)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
pub fn load_network_readers<N: Read, L: Read>(nodes: N, links: L) -> NetworkResult<RoadNetwork> {
    let mut b = RoadNetworkBuilder::new();

    let mut node_reader = csv::Reader::from_reader(nodes);
    for (line, result) in node_reader.deserialize::<NodeRecord>().enumerate() {
        let row = result.map_err(|e| NetworkError::Parse(format!("nodes row {}: {e}", line + 1)))?;
        match (row.lat, row.lon) {
            (Some(lat), Some(lon)) => b.add_node_at(row.key.trim(), row.label.trim(), GeoPoint::new(lat, lon)),
            (None, None)           => b.add_node(row.key.trim(), row.label.trim()),
            _ => {
                return Err(NetworkError::Parse(format!(
                    "nodes row {}: lat and lon must both be present or both empty",
                    line + 1
                )));
            }
        };
    }

    let mut link_reader = csv::Reader::from_reader(links);
    for (line, result) in link_reader.deserialize::<LinkRecord>().enumerate() {
        let row = result.map_err(|e| NetworkError::Parse(format!("links row {}: {e}", line + 1)))?;
        let eco_priority = parse_flag(&row.eco_priority)
            .map_err(|msg| NetworkError::Parse(format!("links row {}: {msg}", line + 1)))?;
        b.add_road(RoadSpec {
            from:                 row.from.trim().to_owned(),
            to:                   row.to.trim().to_owned(),
            distance_km:          row.distance_km,
            time_min:             row.time_min,
            eco_priority,
            emissions_multiplier: row.emissions_multiplier.unwrap_or(1.0),
        });
    }

    b.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(format!("invalid eco_priority {other:?}: expected true/false")),
    }
}
