//! Routing error type.

use thiserror::Error;

use er_core::NodeId;

/// Errors produced by `er-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("traffic snapshot covers {snapshot} links but the network has {network}")]
    SnapshotMismatch { snapshot: usize, network: usize },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
