//! `er-agent` — the alpha predictor behind the balanced route.
//!
//! The "agent" is a deterministic heuristic, not a trained policy: it maps a
//! normalized [`AlphaContext`] to the weight on emissions in the balanced
//! search.  Two models are provided and selected by
//! [`AlphaModelKind`][er_core::AlphaModelKind]:
//!
//! | Model                 | Range          | Inputs                                     |
//! |-----------------------|----------------|--------------------------------------------|
//! | [`GraphAlphaHeuristic`] | `[0.05, 0.6]` | congestion, incidents, acceptance, vehicle |
//! | [`TrafficStateAlpha`] | `[0.1, 2.0]`   | congestion, incidents, time of day, weather |
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`context`]    | `AlphaContext` and its normalization                 |
//! | [`model`]      | `AlphaModel` trait, both heuristics, `model_for`     |
//! | [`prediction`] | `AlphaPrediction`, `predict_alpha`, `confidence`     |

pub mod context;
pub mod model;
pub mod prediction;


pub use context::AlphaContext;
pub use model::{model_for, AlphaModel, GraphAlphaHeuristic, TrafficStateAlpha};
pub use prediction::{confidence, predict_alpha, AlphaPrediction};
