//! Remote route-optimization seam.
//!
//! A deployment may delegate route computation to an external service.  The
//! planner treats every [`RemoteError`] the same way: it logs a warning,
//! recomputes locally with the same pathfinder, and tags the response
//! [`PlanSource::LocalFallback`][crate::PlanSource::LocalFallback].

use std::time::Duration;

use thiserror::Error;

use er_network::RoadNetwork;
use er_routing::{RouteResult, RouteVariant};

use crate::PlanRequest;

/// What a remote optimizer returns.
#[derive(Clone, Debug, PartialEq)]
pub struct RemotePlan {
    /// Unscored route variants.  Must include a fastest and a balanced route.
    pub routes: Vec<RouteResult>,
    /// Alpha the remote side used for its balanced route.
    pub alpha:  f64,
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote optimizer unavailable: {0}")]
    Unavailable(String),

    #[error("remote optimizer timed out after {0:?}")]
    Timeout(Duration),

    #[error("remote optimizer returned an unusable plan: {0}")]
    InvalidResponse(String),
}

/// External route optimizer.
///
/// Implementations own their transport and any timeout policy; the planner
/// only sees the outcome.
pub trait RemoteOptimizer: Send + Sync {
    fn optimize(&self, network: &RoadNetwork, request: &PlanRequest) -> Result<RemotePlan, RemoteError>;
}

/// A remote optimizer that is never reachable.
///
/// Useful for exercising the fallback path.
#[derive(Copy, Clone, Debug, Default)]
pub struct OfflineOptimizer;

impl RemoteOptimizer for OfflineOptimizer {
    fn optimize(&self, _network: &RoadNetwork, _request: &PlanRequest) -> Result<RemotePlan, RemoteError> {
        Err(RemoteError::Unavailable("offline".into()))
    }
}

/// Check that `plan` contains connected fastest and balanced routes between
/// the request's endpoints over links of `network`.
///
/// Returns the positions of the fastest and balanced routes in `plan.routes`.
pub(crate) fn check_remote_plan(
    network: &RoadNetwork,
    request: &PlanRequest,
    plan: &RemotePlan,
) -> Result<(usize, usize), RemoteError> {
    if !plan.alpha.is_finite() {
        return Err(RemoteError::InvalidResponse(format!("alpha {} is not finite", plan.alpha)));
    }
    let position = |variant: RouteVariant| {
        plan.routes
            .iter()
            .position(|r| r.variant == variant)
            .ok_or_else(|| RemoteError::InvalidResponse(format!("missing {variant} route")))
    };
    let fastest = position(RouteVariant::Fastest)?;
    let balanced = position(RouteVariant::Balanced)?;

    for route in &plan.routes {
        if route.origin() != Some(request.origin) || route.destination() != Some(request.destination) {
            return Err(RemoteError::InvalidResponse(format!(
                "{} route does not connect the requested endpoints",
                route.variant
            )));
        }
        if route.path.len() != route.links.len() + 1 {
            return Err(RemoteError::InvalidResponse(format!(
                "{} route has {} nodes for {} links",
                route.variant,
                route.path.len(),
                route.links.len()
            )));
        }
        for (i, &l) in route.links.iter().enumerate() {
            let valid = l.index() < network.link_count() && {
                let link = network.link(l);
                link.from == route.path[i] && link.to == route.path[i + 1]
            };
            if !valid {
                return Err(RemoteError::InvalidResponse(format!(
                    "{} route uses {l}, which does not join its path",
                    route.variant
                )));
            }
        }
    }
    Ok((fastest, balanced))
}
