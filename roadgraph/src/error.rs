//! Error type shared by graph construction, configuration and queries.

use std::fmt::Debug;
use thiserror::Error;

/// Failures reported by the graph.
///
/// A search that exhausts its frontier is not an error: it yields `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
  /// An edge endpoint or a query endpoint was never added as a vertex.
  #[error("vertex {0} is not present in the graph")]
  UnknownVertex(String),

  /// Edge lengths are physical distances and must be finite and non-negative.
  #[error("edge length must be finite and non-negative, got {0}")]
  InvalidLength(f64),

  /// A tour cannot leave a vertex without outgoing edges.
  #[error("vertex {0} has no outgoing edges")]
  NoOutgoingEdges(String),

  #[error("speed for road type '{road_type}' must be finite and positive, got {speed}")]
  InvalidSpeed { road_type: String, speed: f64 },
}

impl GraphError {
  pub(crate) fn unknown_vertex<P: Debug>(point: &P) -> Self {
    GraphError::UnknownVertex(format!("{:?}", point))
  }

  pub(crate) fn no_outgoing_edges<P: Debug>(point: &P) -> Self {
    GraphError::NoOutgoingEdges(format!("{:?}", point))
  }
}
