//! `er-network` — road network model, validation, and loading.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`network`] | `Node`, `Link`, `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, `expand_bidirectional`, `adjacency` |
//! | [`loader`]  | `load_network_csv`, `load_network_readers`                     |
//! | [`sample`]  | `pune_network` — the built-in 10-node demo network             |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                             |

pub mod error;
pub mod loader;
pub mod network;
pub mod sample;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_network_csv, load_network_readers};
pub use network::{adjacency, expand_bidirectional, Link, Node, RoadNetwork, RoadNetworkBuilder, RoadSpec};
pub use sample::pune_network;
