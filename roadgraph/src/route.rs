//! Route finding algorithms.
//!
//! These functions do not touch any cache. All scratch state is allocated per call, so several
//! queries can run at the same time against one shared graph.
//!
//! `visit` is called synchronously, exactly once for every node the search processes, in
//! processing order. It only observes the search and has no effect on the result.

use crate::search_space::SearchSpace;
use crate::{Heuristic, Identifier, IntoNeighbors, IntoWeightedNeighbors};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq)]
pub struct Route<N: Identifier> {
  /// Travel cost of the route. For [`bfs`] this is the number of edges.
  pub cost: f64,
  /// Nodes from the origin to the destination, both included.
  pub ids: Vec<N>,
}

/// Breadth-first search: route with the fewest edges.
///
/// A node gets its parent when it is discovered, and is never enqueued twice.
pub fn bfs<G, V>(graph: G, start: G::NodeId, goal: G::NodeId, mut visit: V) -> Option<Route<G::NodeId>>
where
  G: Copy + IntoNeighbors,
  V: FnMut(G::NodeId),
{
  let mut queue = VecDeque::new();
  let mut discovered = HashSet::new();
  let mut parents: HashMap<G::NodeId, G::NodeId> = HashMap::new();

  queue.push_back(start);
  discovered.insert(start);

  while let Some(id) = queue.pop_front() {
    trace!(node = ?id, "bfs visiting");
    visit(id);

    if id == goal {
      let mut ids = vec![goal];
      let mut current = goal;
      while let Some(parent) = parents.get(&current) {
        ids.push(*parent);
        current = *parent;
      }
      // Need to reverse the list to get elements in the routing order
      ids.reverse();
      debug!(visited = discovered.len(), "bfs reached goal");
      return Some(Route {
        cost: (ids.len() - 1) as f64,
        ids,
      });
    }

    for target_id in graph.neighbors(id) {
      if discovered.insert(target_id) {
        parents.insert(target_id, id);
        queue.push_back(target_id);
      }
    }
  }

  debug!(visited = discovered.len(), "bfs exhausted the frontier");
  None
}

/// Dijkstra search over edge travel times.
pub fn dijkstra<G, V>(graph: G, start: G::NodeId, goal: G::NodeId, visit: V) -> Option<Route<G::NodeId>>
where
  G: Copy + IntoWeightedNeighbors,
  V: FnMut(G::NodeId),
{
  shortest_route(graph, start, goal, visit, |_| 0.0)
}

/// A* search: Dijkstra with the frontier ordered by distance plus [`Heuristic::estimate`]
/// towards `goal`.
pub fn a_star<G, V>(graph: G, start: G::NodeId, goal: G::NodeId, visit: V) -> Option<Route<G::NodeId>>
where
  G: Copy + IntoWeightedNeighbors + Heuristic,
  V: FnMut(G::NodeId),
{
  shortest_route(graph, start, goal, visit, |id| graph.estimate(id, goal))
}

fn shortest_route<G, V, H>(
  graph: G,
  start: G::NodeId,
  goal: G::NodeId,
  mut visit: V,
  estimate: H,
) -> Option<Route<G::NodeId>>
where
  G: Copy + IntoWeightedNeighbors,
  V: FnMut(G::NodeId),
  H: Fn(G::NodeId) -> f64,
{
  let mut search_space = SearchSpace::new();
  search_space.init_with_estimate(start, estimate(start));

  while let Some((id, distance)) = search_space.settle_next() {
    let remaining = search_space.label(id).map_or(0.0, |label| label.estimate);
    trace!(node = ?id, distance, remaining, "settled");
    visit(id);

    if id == goal {
      debug!(settled = search_space.num_settled(), cost = distance, "reached goal");
      let mut ids = search_space.unwind(goal);
      ids.reverse();
      return Some(Route { cost: distance, ids });
    }

    search_space.relax(graph, id, distance, &estimate);
  }

  debug!(settled = search_space.num_settled(), "frontier exhausted");
  None
}

/// Dijkstra search from `start` that stops once every reachable node of `targets` is settled.
///
/// Returns the fastest route to each reachable target; unreachable targets are missing from the
/// result.
pub fn one_to_many<G, V>(
  graph: G,
  start: G::NodeId,
  targets: &[G::NodeId],
  mut visit: V,
) -> HashMap<G::NodeId, Route<G::NodeId>>
where
  G: Copy + IntoWeightedNeighbors,
  V: FnMut(G::NodeId),
{
  let mut remaining: HashSet<G::NodeId> = targets.iter().copied().collect();
  let mut routes = HashMap::new();

  let mut search_space = SearchSpace::new();
  search_space.init(start);

  while !remaining.is_empty() {
    let (id, distance) = match search_space.settle_next() {
      Some(settled) => settled,
      None => break,
    };
    visit(id);

    if remaining.remove(&id) {
      let mut ids = search_space.unwind(id);
      ids.reverse();
      routes.insert(id, Route { cost: distance, ids });
    }

    search_space.relax(graph, id, distance, |_| 0.0);
  }

  debug!(
    settled = search_space.num_settled(),
    reached = routes.len(),
    missing = remaining.len(),
    "one-to-many search done"
  );
  routes
}
