//! Round trips through several stops.
//!
//! The visiting order is a heuristic, not an optimum: a nearest-neighbour tour improved with
//! 2-opt exchanges until none of them shortens the trip.

use crate::route::{one_to_many, Route};
use crate::{Identifier, IntoWeightedNeighbors};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

// Improvements smaller than this are float noise
const MIN_GAIN: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour<N: Identifier> {
  /// Stops in visiting order, without the start.
  pub order: Vec<N>,
  /// Every node of the trip, beginning and ending at the start.
  pub path: Vec<N>,
  /// Total travel time
  pub cost: f64,
}

/// Plans a closed trip from `start` through every stop and back.
///
/// Duplicate stops and stops equal to `start` are ignored. Leg costs come from one Dijkstra
/// search per site; `visit` observes every node those searches settle. Returns `None` when some
/// stop cannot be reached from another site.
pub fn plan_tour<G, V>(graph: G, start: G::NodeId, stops: &[G::NodeId], mut visit: V) -> Option<Tour<G::NodeId>>
where
  G: Copy + IntoWeightedNeighbors,
  V: FnMut(G::NodeId),
{
  let mut seen = HashSet::new();
  seen.insert(start);
  let mut sites = vec![start];
  sites.extend(stops.iter().copied().filter(|stop| seen.insert(*stop)));

  let mut legs: Vec<Vec<Route<G::NodeId>>> = Vec::with_capacity(sites.len());
  for from in &sites {
    let mut routes = one_to_many(graph, *from, &sites, &mut visit);
    let row = sites
      .iter()
      .map(|to| routes.remove(to))
      .collect::<Option<Vec<_>>>()?;
    legs.push(row);
  }

  let costs: Vec<Vec<f64>> = legs
    .iter()
    .map(|row| row.iter().map(|leg| leg.cost).collect())
    .collect();

  let mut order = nearest_neighbour(&costs);
  improve_2opt(&costs, &mut order);

  let cost = tour_cost(&costs, &order);
  let mut path = vec![start];
  let mut previous = 0;
  for site in order.iter().copied().chain(std::iter::once(0)) {
    path.extend(legs[previous][site].ids.iter().skip(1));
    previous = site;
  }

  Some(Tour {
    order: order.iter().map(|site| sites[*site]).collect(),
    path,
    cost,
  })
}

/// Greedy visiting order of sites `1..n`, always moving to the cheapest unvisited site.
fn nearest_neighbour(costs: &[Vec<f64>]) -> Vec<usize> {
  let mut unvisited: Vec<usize> = (1..costs.len()).collect();
  let mut order = Vec::with_capacity(unvisited.len());
  let mut current = 0;

  while !unvisited.is_empty() {
    let mut best = 0;
    for (i, site) in unvisited.iter().enumerate() {
      if costs[current][*site] < costs[current][unvisited[best]] {
        best = i;
      }
    }
    current = unvisited.remove(best);
    order.push(current);
  }
  order
}

/// Reverses segments of the order while that makes the round trip cheaper. Roads are directed,
/// so every candidate is priced as a whole trip.
fn improve_2opt(costs: &[Vec<f64>], order: &mut Vec<usize>) {
  let mut best_cost = tour_cost(costs, order);
  let mut improved = true;

  while improved {
    improved = false;
    for i in 0..order.len() {
      for j in i + 1..order.len() {
        order[i..=j].reverse();
        let cost = tour_cost(costs, order);
        if cost + MIN_GAIN < best_cost {
          trace!(i, j, cost, "2-opt exchange");
          best_cost = cost;
          improved = true;
        } else {
          order[i..=j].reverse();
        }
      }
    }
  }
}

/// Cost of `0 -> order... -> 0`
fn tour_cost(costs: &[Vec<f64>], order: &[usize]) -> f64 {
  let mut cost = 0.0;
  let mut previous = 0;
  for site in order.iter().copied().chain(std::iter::once(0)) {
    cost += costs[previous][site];
    previous = site;
  }
  cost
}

#[cfg(test)]
mod tests {
  use super::super::test_utils::*;
  use super::*;

  #[test]
  fn test_nearest_neighbour_then_2opt() {
    // Symmetric square where greedy crosses itself: 0 -> 1 -> 3 -> 2 -> 0
    let costs = vec![
      vec![0.0, 1.0, 2.0, 1.5],
      vec![1.0, 0.0, 1.5, 1.4],
      vec![2.0, 1.5, 0.0, 1.0],
      vec![1.5, 1.4, 1.0, 0.0],
    ];

    let mut order = nearest_neighbour(&costs);
    assert_eq!(order, vec![1, 3, 2]);
    assert!((tour_cost(&costs, &order) - 5.4).abs() < 1e-12);

    improve_2opt(&costs, &mut order);
    assert_eq!(order, vec![1, 2, 3]);
    assert!((tour_cost(&costs, &order) - 5.0).abs() < 1e-12);
  }

  #[test]
  fn test_round_trip_visits_every_stop() {
    init_tracing();
    let graph = weighted_grid_graph(5, 5);
    let start = GridPoint(0, 0);
    let stops = [GridPoint(4, 4), GridPoint(0, 4), GridPoint(4, 0), GridPoint(2, 2), GridPoint(4, 4)];

    let tour = plan_tour(&graph, start, &stops, |_| {}).unwrap();

    assert_eq!(tour.order.len(), 4);
    let ordered: HashSet<_> = tour.order.iter().cloned().collect();
    let expected: HashSet<_> = stops.iter().cloned().collect();
    assert_eq!(ordered, expected);

    assert_eq!(tour.path.first(), Some(&start));
    assert_eq!(tour.path.last(), Some(&start));
    for stop in &stops {
      assert!(tour.path.contains(stop));
    }
    assert!((graph.path_time(&tour.path).unwrap() - tour.cost).abs() < 1e-9);
  }

  #[test]
  fn test_no_stops() {
    let graph = weighted_grid_graph(2, 2);
    let tour = plan_tour(&graph, GridPoint(0, 0), &[GridPoint(0, 0)], |_| {}).unwrap();
    assert!(tour.order.is_empty());
    assert_eq!(tour.path, vec![GridPoint(0, 0)]);
    assert_eq!(tour.cost, 0.0);
  }

  #[test]
  fn test_one_way_stop() {
    // (2, 0) can be reached but there is no way back
    let graph = grid_graph_from_edges(&[((0, 0), (1, 0), 1.0), ((1, 0), (0, 0), 1.0), ((1, 0), (2, 0), 1.0)]);

    assert!(plan_tour(&graph, GridPoint(0, 0), &[GridPoint(1, 0)], |_| {}).is_some());
    assert!(plan_tour(&graph, GridPoint(0, 0), &[GridPoint(2, 0)], |_| {}).is_none());
  }
}
