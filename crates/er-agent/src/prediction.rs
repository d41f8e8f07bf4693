//! Timed predictions with a confidence estimate.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use er_traffic::is_peak_hour;

use crate::{AlphaContext, AlphaModel};

/// One alpha prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlphaPrediction {
    pub alpha:              f64,
    /// In `[0.1, 1.0]`.
    pub confidence:         f64,
    pub inference_duration: Duration,
    /// [`AlphaModel::name`] of the producing model, or `"override"`.
    pub model:              String,
}

impl AlphaPrediction {
    /// Caller-supplied alpha; no model ran.
    pub fn fixed(alpha: f64) -> Self {
        Self {
            alpha,
            confidence:         1.0,
            inference_duration: Duration::ZERO,
            model:              "override".into(),
        }
    }

    pub fn inference_ms(&self) -> f64 {
        self.inference_duration.as_secs_f64() * 1000.0
    }
}

/// Run `model` on `ctx`, timing the call.
pub fn predict_alpha(model: &dyn AlphaModel, ctx: &AlphaContext) -> AlphaPrediction {
    let started = Instant::now();
    let alpha = model.predict(ctx);
    let inference_duration = started.elapsed();

    let prediction = AlphaPrediction {
        alpha,
        confidence: confidence(ctx),
        inference_duration,
        model: model.name().to_owned(),
    };
    debug!(
        model = model.name(),
        alpha,
        confidence = prediction.confidence,
        "alpha predicted"
    );
    prediction
}

/// How settled the traffic picture is.
///
/// ```text
/// confidence = 1 − |congestion − 0.5| − 0.2 (peak hours) − 0.3*incidents
/// ```
/// clamped to `[0.1, 1.0]`.
pub fn confidence(ctx: &AlphaContext) -> f64 {
    let stability = 1.0 - (ctx.congestion - 0.5).abs();
    let peak_penalty = if is_peak_hour(ctx.hour()) { 0.2 } else { 0.0 };
    let incident_penalty = ctx.incident_density * 0.3;
    let c = stability - peak_penalty - incident_penalty;
    if c.is_nan() { 0.1 } else { c.clamp(0.1, 1.0) }
}
