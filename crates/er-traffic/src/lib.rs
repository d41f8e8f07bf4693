//! `er-traffic` — traffic state for one planning request.
//!
//! A [`TrafficSnapshot`] is generated once per request by the
//! [`TrafficSimulator`] and then shared, read-only, by all three goal-mode
//! searches.  Regenerating it between searches would make the fastest, eco,
//! and balanced routes incomparable.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`snapshot`]  | `TrafficSnapshot`                                         |
//! | [`simulator`] | `TrafficSimulator`, `estimate_area_congestion`, `is_peak_hour` |

pub mod simulator;
pub mod snapshot;


pub use simulator::{estimate_area_congestion, is_peak_hour, TrafficSimulator};
pub use snapshot::TrafficSnapshot;
