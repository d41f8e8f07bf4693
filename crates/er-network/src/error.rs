//! Network error type.

use thiserror::Error;

use er_core::NodeId;

/// Errors produced by `er-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("link {from}->{to} references undeclared node {missing:?}")]
    UndeclaredNode { from: String, to: String, missing: String },

    #[error("node key {0:?} declared more than once")]
    DuplicateNode(String),

    #[error("invalid link {from}->{to}: {reason}")]
    InvalidLink { from: String, to: String, reason: String },

    #[error("invalid node {key:?}: {reason}")]
    InvalidNode { key: String, reason: String },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
