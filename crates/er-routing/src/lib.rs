//! `er-routing` — edge cost evaluation and goal-mode path search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`cost`]       | `EdgeCost`, `evaluate` (the edge cost function)          |
//! | [`goal`]       | `RouteGoal`, `GoalWeights`                               |
//! | [`route`]      | `RouteVariant`, `RouteResult`                            |
//! | [`pathfinder`] | `Pathfinder` trait, `CostInputs`, `DijkstraPathfinder`   |
//! | [`error`]      | `RoutingError`, `RoutingResult<T>`                       |

pub mod cost;
pub mod error;
pub mod goal;
pub mod pathfinder;
pub mod route;


pub use cost::{evaluate, EdgeCost, INCIDENT_THRESHOLD, INCIDENT_TIME_PENALTY};
pub use error::{RoutingError, RoutingResult};
pub use goal::{GoalWeights, RouteGoal};
pub use pathfinder::{CostInputs, DijkstraPathfinder, Pathfinder};
pub use route::{RouteResult, RouteVariant};
