//! Shortest routes in a directed road network.
//!
//! A [`Graph`](graph::Graph) is filled with intersections and road segments by an external
//! loader and then answers route queries with breadth-first search, Dijkstra or A*. Found
//! routes are memoized per `(algorithm, start, goal)` for the lifetime of the graph.
//!
//! Search algorithms in [`route`] are generic over the small set of access traits defined
//! here, so they can run on anything that describes outgoing connectivity.

pub mod cache;
pub mod error;
pub mod geo_point;
pub mod graph;
pub mod route;
pub mod speed;
pub mod tour;

mod search_space;

#[cfg(test)]
mod test_utils;

pub use cache::{Algorithm, CacheKey, PathCache};
pub use error::GraphError;
pub use geo_point::GeoPoint;
pub use graph::{Edge, Graph, Node};
pub use route::Route;
pub use speed::SpeedTable;
pub use tour::Tour;

use std::fmt::Debug;
use std::hash::Hash;

// ====== Basic traits =====

/// Requirements for a node identifier
pub trait Identifier: Eq + Hash + Copy + Debug {}
impl<T> Identifier for T where T: Eq + Hash + Copy + Debug {}

/// A point of the road network. Points are supplied by the caller, the graph only uses them
/// as keys and for straight-line estimates.
pub trait Location: Identifier {
  /// Straight-line distance to `other`, measured in the same unit as edge lengths.
  fn distance(&self, other: &Self) -> f64;
}

/// Defines type of the identifier for the graph
pub trait GraphBase {
  type NodeId: Identifier;
}

// ====== Neighbors access =====

/// Unweighted connectivity: for node `u` returns every `v` such that there is an edge `u -> v`.
/// Parallel edges yield the same target more than once.
pub trait IntoNeighbors: GraphBase {
  type Neighbors: Iterator<Item = Self::NodeId>;
  fn neighbors(self, node: Self::NodeId) -> Self::Neighbors;
}

/// Weighted connectivity: outgoing edges of a node as `(target, cost)` pairs.
pub trait IntoWeightedNeighbors: GraphBase {
  type Arcs: Iterator<Item = (Self::NodeId, f64)>;
  fn weighted_neighbors(self, node: Self::NodeId) -> Self::Arcs;
}

/// Lower bound of the remaining cost from a node to the goal of the current query.
///
/// A* only returns optimal routes when the estimate never exceeds the real cost.
pub trait Heuristic: GraphBase {
  fn estimate(&self, from: Self::NodeId, goal: Self::NodeId) -> f64;
}

// ====== Blanket implementations =====

impl<'a, G: GraphBase> GraphBase for &'a G {
  type NodeId = G::NodeId;
}

impl<'a, G: Heuristic> Heuristic for &'a G {
  fn estimate(&self, from: Self::NodeId, goal: Self::NodeId) -> f64 {
    (*self).estimate(from, goal)
  }
}
