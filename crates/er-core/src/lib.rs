//! `er-core` — foundational types for the eco-route planner.
//!
//! This crate is a dependency of every other `er-*` crate.  It has no `er-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `LinkId`                                      |
//! | [`geo`]       | `GeoPoint`, haversine distance                          |
//! | [`rng`]       | `RandomSource` trait, `SeededRandom`, `SequenceRandom`  |
//! | [`vehicle`]   | `FuelType`, `VehicleProfile`, `EmissionProfile`         |
//! | [`context`]   | `TripContext` (time of day, congestion, acceptance)     |
//! | [`config`]    | `EngineConfig` and its per-component sections          |
//! | [`error`]     | `CoreError`, `CoreResult`                               |

pub mod config;
pub mod context;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AlphaConfig, AlphaModelKind, CreditConfig, CreditScheme, EngineConfig, RoutingConfig,
    TrafficConfig, VehicleConfig,
};
pub use context::TripContext;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{LinkId, NodeId};
pub use rng::{RandomSource, SeededRandom, SequenceRandom};
pub use vehicle::{EmissionProfile, FuelType, VehicleProfile};
