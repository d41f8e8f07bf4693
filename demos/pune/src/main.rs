//! pune — command-line front end for the eco-route planner.
//!
//! Plans fastest, eco, and balanced routes across the ten-node Pune sample
//! network (or a network loaded from CSV), prints the routes ranked by green
//! credits, and optionally exports the audit ledger.
//!
//! ```text
//! pune --origin A --dest J --fuel diesel --hour 18.5 --requests 5 --output output/pune
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use er_core::{EngineConfig, FuelType, GeoPoint, NodeId, SeededRandom, TripContext, VehicleProfile};
use er_network::{load_network_csv, pune_network, RoadNetwork};
use er_output::{write_ledger, AuditLedger, CsvLedgerWriter, LedgerWriter, RouteRow};
use er_planner::{OfflineOptimizer, PlanRequest, PlanResponse, PlannerBuilder};
use er_traffic::estimate_area_congestion;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "pune", about = "Plan fastest, eco, and balanced routes with green credits")]
struct Args {
    /// Origin node key.
    #[arg(long, default_value = "A")]
    origin: String,

    /// Destination node key.
    #[arg(long, default_value = "J")]
    dest: String,

    /// Snap the origin to the node nearest `LAT,LON` instead of `--origin`.
    #[arg(long, value_name = "LAT,LON")]
    origin_at: Option<String>,

    /// petrol, diesel, cng, electric, or hybrid.
    #[arg(long, default_value = "petrol")]
    fuel: FuelType,

    /// km per unit fuel (defaults to the fuel type's typical value).
    #[arg(long)]
    efficiency: Option<f64>,

    #[arg(long, default_value_t = 1)]
    passengers: u32,

    /// Hour of day, 0.0 to 24.0.
    #[arg(long, default_value_t = 8.5)]
    hour: f64,

    /// Day of week, 0 = Monday.
    #[arg(long, default_value_t = 1)]
    day: u8,

    /// Area congestion factor (defaults to the time-of-day estimate).
    #[arg(long)]
    avg_cf: Option<f64>,

    /// Historical eco-route acceptance rate, 0.0 to 1.0.
    #[arg(long, default_value_t = 0.5)]
    acceptance: f64,

    /// Fixed balanced-route alpha; skips the alpha heuristic.
    #[arg(long)]
    alpha: Option<f64>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of requests to plan (each draws its own traffic snapshot).
    #[arg(short = 'n', long, default_value_t = 1)]
    requests: u32,

    /// JSON engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Node CSV; requires `--links`.
    #[arg(long, requires = "links")]
    nodes: Option<PathBuf>,

    /// Link CSV; requires `--nodes`.
    #[arg(long, requires = "nodes")]
    links: Option<PathBuf>,

    /// Directory for `audit_entries.csv` and `routes.csv`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write `ledger.db` into the output directory.
    #[cfg(feature = "sqlite")]
    #[arg(long, requires = "output")]
    sqlite: bool,

    /// Route every request through an unreachable remote optimizer.
    #[arg(long)]
    offline_remote: bool,

    /// Print each response as JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // 1. Network and configuration.
    let network = match (&args.nodes, &args.links) {
        (Some(nodes), Some(links)) => load_network_csv(nodes, links)
            .with_context(|| format!("loading {} and {}", nodes.display(), links.display()))?,
        _ => pune_network()?,
    };
    let config = match &args.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let origin = match &args.origin_at {
        Some(pos) => {
            let pos = parse_position(pos)?;
            network.nearest_node(pos).with_context(|| format!("no node with coordinates near {pos}"))?
        }
        None => resolve(&network, &args.origin)?,
    };
    let destination = resolve(&network, &args.dest)?;

    // 2. Planner.
    let builder = PlannerBuilder::new(network).config(config);
    let planner = if args.offline_remote {
        builder.remote(OfflineOptimizer).build()?
    } else {
        builder.build()?
    };
    let network = planner.network();

    // 3. Request.
    let avg_cf = args.avg_cf.unwrap_or_else(|| estimate_area_congestion(args.hour as u32));
    let vehicle = VehicleProfile::new(
        args.fuel,
        args.efficiency.unwrap_or_else(|| args.fuel.typical_efficiency()),
        args.passengers,
    );
    let context = TripContext::new(args.hour, args.day, avg_cf, args.acceptance);
    let mut request = PlanRequest::new(origin, destination, vehicle, context);
    if let Some(alpha) = args.alpha {
        request = request.with_alpha(alpha);
    }

    println!("=== pune — eco-route planner ===");
    println!(
        "{} → {}  |  {} @ {:.1} km/unit, {} passenger(s)  |  hour {:.1}, cf {:.2}",
        network.key(origin),
        network.key(destination),
        args.fuel,
        vehicle.efficiency_rating,
        args.passengers,
        args.hour,
        avg_cf,
    );
    println!();

    // 4. Plan.
    let mut master = SeededRandom::new(args.seed);
    let mut ledger = AuditLedger::new();
    let mut route_rows = Vec::new();
    let t0 = Instant::now();

    for i in 0..args.requests {
        let mut rng = master.child(u64::from(i));
        let response = planner.plan(&request, &mut rng, &mut ledger)?;
        debug!(request = i, seq = response.ledger_seq, "request planned");

        for route in &response.routes {
            let keys = network.path_keys(&route.path);
            route_rows.push(RouteRow::new(response.ledger_seq as u64, route, &keys));
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print_response(network, i, &response);
        }
    }
    let elapsed = t0.elapsed();

    // 5. Summary.
    let stats = planner.stats();
    println!("Planned {} request(s) in {:.3} ms", stats.requests(), elapsed.as_secs_f64() * 1e3);
    println!("  remote plans     : {}", stats.remote_plans());
    println!("  local fallbacks  : {}", stats.fallbacks());
    if let Some(mean) = stats.mean_planning_time() {
        println!("  mean latency     : {:.3} ms", mean.as_secs_f64() * 1e3);
    }
    println!("  carbon saved     : {:.1} g", ledger.cumulative_carbon_saved());
    if let Some(avg) = ledger.average_alpha() {
        println!("  mean alpha       : {avg:.3}");
    }

    // 6. Export.
    if let Some(dir) = &args.output {
        let mut writer = CsvLedgerWriter::new(dir)?;
        write_ledger(&ledger, &mut writer)?;
        writer.write_routes(&route_rows)?;
        writer.finish()?;

        #[cfg(feature = "sqlite")]
        if args.sqlite {
            let mut db = er_output::SqliteLedgerWriter::new(dir)?;
            write_ledger(&ledger, &mut db)?;
            db.write_routes(&route_rows)?;
            db.finish()?;
        }

        info!(dir = %dir.display(), entries = ledger.len(), routes = route_rows.len(), "ledger written");
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resolve(network: &RoadNetwork, key: &str) -> Result<NodeId> {
    network.node_by_key(key).with_context(|| format!("unknown node key {key:?}"))
}

fn parse_position(s: &str) -> Result<GeoPoint> {
    let Some((lat, lon)) = s.split_once(',') else {
        bail!("expected LAT,LON, got {s:?}");
    };
    let pos = GeoPoint::new(lat.trim().parse()?, lon.trim().parse()?);
    if !pos.is_valid() {
        bail!("{s:?} is not a valid coordinate");
    }
    Ok(pos)
}

fn print_response(network: &RoadNetwork, request: u32, response: &PlanResponse) {
    print!("Request {request}  [{}]  alpha {:.3} ({})", response.source, response.alpha.alpha, response.alpha.model);
    match &response.traffic {
        Some(t) => println!(
            "  |  mean congestion {:.2}, incidents {:.2}",
            t.mean_congestion, t.incident_density
        ),
        None => println!(),
    }

    println!(
        "{:<9} {:<24} {:>8} {:>10} {:>12} {:>8}",
        "Variant", "Path", "km", "min", "CO2 g", "Credits"
    );
    println!("{}", "-".repeat(76));
    for route in &response.routes {
        println!(
            "{:<9} {:<24} {:>8.1} {:>10.2} {:>12.1} {:>8.2}",
            route.variant,
            network.path_keys(&route.path).join("-"),
            route.total_distance_km,
            route.total_time_min,
            route.total_emissions_g,
            route.green_credits,
        );
    }
    println!(
        "  ledger #{}: saved {:.1} g for {:+.2} min",
        response.ledger_seq,
        response.audit.carbon_saved_g,
        response.audit.time_cost_min(),
    );
    println!();
}
