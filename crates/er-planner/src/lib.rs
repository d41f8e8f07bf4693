//! `er-planner` — request orchestration for the eco-route planner.
//!
//! Ties the other `er-*` crates together: a [`RoutePlanner`] validates a
//! [`PlanRequest`], draws one traffic snapshot, runs the fastest, eco, and
//! balanced searches against it, scores credits, and appends an audit entry.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`request`] | `PlanRequest`, `PlanResponse`, `PlanSource`, `TrafficSummary` |
//! | [`planner`] | `RoutePlanner`, `PlannerStats`                               |
//! | [`builder`] | `PlannerBuilder`                                             |
//! | [`remote`]  | `RemoteOptimizer` trait, `RemotePlan`, `RemoteError`         |
//! | [`error`]   | `PlanError`, `PlanResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Run the three goal searches with `rayon::join`      |

pub mod builder;
pub mod error;
pub mod planner;
pub mod remote;
pub mod request;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use error::{PlanError, PlanResult};
pub use planner::{PlannerStats, RoutePlanner};
pub use remote::{OfflineOptimizer, RemoteError, RemoteOptimizer, RemotePlan};
pub use request::{PlanRequest, PlanResponse, PlanSource, TrafficSummary};
