//! The road network graph.
//!
//! [`Graph`] owns every intersection ([`Node`]) with its outgoing road segments ([`Edge`]) and
//! one [`PathCache`]. It is filled by a loader through [`Graph::add_vertex`] and
//! [`Graph::add_edge`] before any query runs.
//!
//! Search entry points check the cache first. A cache hit returns the stored path without
//! running the search, so the visit observer is not called at all. Found paths are cached,
//! unreachable goals are not.

mod edge;
mod node;

pub use edge::*;
pub use node::*;

use crate::cache::{Algorithm, CacheKey, PathCache};
use crate::error::GraphError;
use crate::route::{self, Route};
use crate::speed::SpeedTable;
use crate::tour::{self, Tour};
use crate::{GraphBase, Heuristic, IntoNeighbors, IntoWeightedNeighbors, Location};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Directed road network keyed by caller supplied points.
pub struct Graph<P: Location> {
  nodes: HashMap<P, Node<P>>,
  speeds: SpeedTable,
  // Lower bound of hours per unit of straight-line distance over every edge
  min_pace: f64,
  cache: PathCache<P>,
}

impl<P: Location> Graph<P> {
  /// Empty graph timing its edges with [`SpeedTable::global`].
  pub fn new() -> Self {
    Self::with_speed_table(SpeedTable::global().clone())
  }

  pub fn with_speed_table(speeds: SpeedTable) -> Self {
    Self {
      nodes: HashMap::new(),
      min_pace: 1.0 / speeds.max_speed(),
      speeds,
      cache: PathCache::new(),
    }
  }

  /// Registers an intersection. Returns `true` if the point was not in the graph before;
  /// adding a known point changes nothing.
  pub fn add_vertex(&mut self, point: P) -> bool {
    if self.nodes.contains_key(&point) {
      return false;
    }
    self.nodes.insert(point, Node::new(point));
    true
  }

  /// Adds a road segment from `from` to `to`. Both points must already be vertices and the
  /// length must be finite and non-negative; otherwise the graph is left untouched.
  pub fn add_edge(
    &mut self,
    from: P,
    to: P,
    road_name: &str,
    road_type: &str,
    length: f64,
  ) -> Result<(), GraphError> {
    if let Err(err) = self.require_vertex(from).and_then(|_| self.require_vertex(to)) {
      warn!(?from, ?to, "edge endpoint is not a vertex");
      return Err(err);
    }
    if !(length.is_finite() && length >= 0.0) {
      warn!(?from, ?to, length, "rejected edge length");
      return Err(GraphError::InvalidLength(length));
    }

    let edge = Edge::new(
      from,
      to,
      road_name.to_string(),
      road_type.to_string(),
      length,
      &self.speeds,
    );
    let straight = from.distance(&to);
    if straight > 0.0 {
      let pace = edge.time() / straight;
      if pace < self.min_pace {
        debug!(?from, ?to, pace, "edge is faster than a straight line at top speed");
        self.min_pace = pace;
      }
    }
    if let Some(node) = self.nodes.get_mut(&from) {
      node.add_edge(edge);
    }
    Ok(())
  }

  pub fn vertex_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn edge_count(&self) -> usize {
    self.nodes.values().map(|node| node.out_degree()).sum()
  }

  pub fn vertices(&self) -> impl Iterator<Item = P> + '_ {
    self.nodes.keys().copied()
  }

  pub fn contains_vertex(&self, point: P) -> bool {
    self.nodes.contains_key(&point)
  }

  pub fn node(&self, point: P) -> Option<&Node<P>> {
    self.nodes.get(&point)
  }

  /// Outgoing edges of `point`, empty for unknown points.
  pub fn edges_from(&self, point: P) -> &[Edge<P>] {
    self.nodes.get(&point).map(|node| node.edges()).unwrap_or(&[])
  }

  pub fn speed_table(&self) -> &SpeedTable {
    &self.speeds
  }

  pub fn cache(&self) -> &PathCache<P> {
    &self.cache
  }

  // ====== Searches =====

  /// Path with the fewest edges from `start` to `goal`, both included.
  pub fn bfs(&mut self, start: P, goal: P) -> Result<Option<Vec<P>>, GraphError> {
    self.bfs_with_observer(start, goal, |_| {})
  }

  pub fn bfs_with_observer<V: FnMut(P)>(
    &mut self,
    start: P,
    goal: P,
    visit: V,
  ) -> Result<Option<Vec<P>>, GraphError> {
    self.cached_search(Algorithm::Bfs, start, goal, |graph| {
      route::bfs(graph, start, goal, visit)
    })
  }

  /// Fastest path from `start` to `goal`, both included.
  pub fn dijkstra(&mut self, start: P, goal: P) -> Result<Option<Vec<P>>, GraphError> {
    self.dijkstra_with_observer(start, goal, |_| {})
  }

  pub fn dijkstra_with_observer<V: FnMut(P)>(
    &mut self,
    start: P,
    goal: P,
    visit: V,
  ) -> Result<Option<Vec<P>>, GraphError> {
    self.cached_search(Algorithm::Dijkstra, start, goal, |graph| {
      route::dijkstra(graph, start, goal, visit)
    })
  }

  /// Fastest path from `start` to `goal` guided by the straight-line distance to the goal.
  ///
  /// The travel time of the result always equals the one found by [`Graph::dijkstra`].
  pub fn a_star_search(&mut self, start: P, goal: P) -> Result<Option<Vec<P>>, GraphError> {
    self.a_star_search_with_observer(start, goal, |_| {})
  }

  pub fn a_star_search_with_observer<V: FnMut(P)>(
    &mut self,
    start: P,
    goal: P,
    visit: V,
  ) -> Result<Option<Vec<P>>, GraphError> {
    self.cached_search(Algorithm::AStar, start, goal, |graph| {
      route::a_star(graph, start, goal, visit)
    })
  }

  /// Closed round trip from `start` through every stop. See [`tour::plan_tour`].
  pub fn tsp(&self, start: P, stops: &[P]) -> Result<Option<Tour<P>>, GraphError> {
    self.tsp_with_observer(start, stops, |_| {})
  }

  pub fn tsp_with_observer<V: FnMut(P)>(
    &self,
    start: P,
    stops: &[P],
    visit: V,
  ) -> Result<Option<Tour<P>>, GraphError> {
    self.require_vertex(start)?;
    if self.edges_from(start).is_empty() {
      return Err(GraphError::no_outgoing_edges(&start));
    }
    for stop in stops {
      self.require_vertex(*stop)?;
    }

    let tour = tour::plan_tour(self, start, stops, visit);
    match &tour {
      Some(tour) => debug!(?start, stops = stops.len(), cost = tour.cost, "tour planned"),
      None => debug!(?start, stops = stops.len(), "some stop is unreachable"),
    }
    Ok(tour)
  }

  // ====== Path metrics =====

  /// Sum of edge lengths along `path`, taking the shortest edge between consecutive points.
  /// `None` if two consecutive points are not connected.
  pub fn path_length(&self, path: &[P]) -> Option<f64> {
    self.path_metric(path, Edge::length)
  }

  /// Sum of travel times along `path`, taking the fastest edge between consecutive points.
  pub fn path_time(&self, path: &[P]) -> Option<f64> {
    self.path_metric(path, Edge::time)
  }

  fn path_metric(&self, path: &[P], metric: fn(&Edge<P>) -> f64) -> Option<f64> {
    path
      .windows(2)
      .map(|pair| {
        self
          .edges_from(pair[0])
          .iter()
          .filter(|edge| edge.to() == pair[1])
          .map(metric)
          .min_by(|a, b| a.total_cmp(b))
      })
      .sum()
  }

  fn require_vertex(&self, point: P) -> Result<(), GraphError> {
    if self.nodes.contains_key(&point) {
      Ok(())
    } else {
      Err(GraphError::unknown_vertex(&point))
    }
  }

  fn cached_search<S>(
    &mut self,
    algorithm: Algorithm,
    start: P,
    goal: P,
    search: S,
  ) -> Result<Option<Vec<P>>, GraphError>
  where
    S: FnOnce(&Self) -> Option<Route<P>>,
  {
    self.require_vertex(start)?;
    self.require_vertex(goal)?;

    let key = CacheKey::new(algorithm, start, goal);
    if let Some(path) = self.cache.get(&key) {
      debug!(%algorithm, ?start, ?goal, "path served from cache");
      return Ok(Some(path.to_vec()));
    }

    match search(&*self) {
      Some(found) => {
        debug!(%algorithm, ?start, ?goal, cost = found.cost, hops = found.ids.len(), "path found");
        self.cache.insert(key, found.ids.clone());
        Ok(Some(found.ids))
      }
      None => {
        debug!(%algorithm, ?start, ?goal, "no path");
        Ok(None)
      }
    }
  }
}

impl<P: Location> Default for Graph<P> {
  fn default() -> Self {
    Graph::new()
  }
}

impl<P: Location> GraphBase for Graph<P> {
  type NodeId = P;
}

impl<'a, P: Location> IntoNeighbors for &'a Graph<P> {
  type Neighbors = std::iter::Map<std::slice::Iter<'a, Edge<P>>, fn(&'a Edge<P>) -> P>;

  fn neighbors(self, node: P) -> Self::Neighbors {
    self.edges_from(node).iter().map(Edge::to as fn(&'a Edge<P>) -> P)
  }
}

impl<'a, P: Location> IntoWeightedNeighbors for &'a Graph<P> {
  type Arcs = std::iter::Map<std::slice::Iter<'a, Edge<P>>, fn(&'a Edge<P>) -> (P, f64)>;

  fn weighted_neighbors(self, node: P) -> Self::Arcs {
    fn arc<P: Location>(edge: &Edge<P>) -> (P, f64) {
      (edge.to(), edge.time())
    }
    self.edges_from(node).iter().map(arc::<P> as fn(&'a Edge<P>) -> (P, f64))
  }
}

impl<P: Location> Heuristic for Graph<P> {
  /// Time to cover the straight-line distance at the fastest pace seen on any edge, and never
  /// slower than the top speed of the table. No edge beats that pace, so the estimate is a lower
  /// bound and stays consistent along every edge.
  fn estimate(&self, from: P, goal: P) -> f64 {
    from.distance(&goal) * self.min_pace
  }
}
