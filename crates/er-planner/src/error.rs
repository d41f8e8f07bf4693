use thiserror::Error;

use er_core::{CoreError, NodeId};
use er_routing::RoutingError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    #[error("planner configuration error: {0}")]
    Config(String),

    #[error("routing error: {0}")]
    Routing(RoutingError),
}

impl From<RoutingError> for PlanError {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::NoPathFound { from, to } => PlanError::NoPathFound { from, to },
            RoutingError::NodeNotFound(n) => PlanError::InvalidInput(format!("unknown node {n}")),
            other => PlanError::Routing(other),
        }
    }
}

impl From<CoreError> for PlanError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidInput(msg) => PlanError::InvalidInput(msg),
            other => PlanError::Config(other.to_string()),
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
