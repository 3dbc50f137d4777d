use crate::cache::Algorithm;
use crate::error::GraphError;
use crate::graph::{Edge, Graph};
use crate::speed::SpeedTable;
use crate::Location;
use std::collections::HashMap;

/// Planar point with Euclidean distance
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint(pub i32, pub i32);

impl Location for GridPoint {
  fn distance(&self, other: &Self) -> f64 {
    let dx = (self.0 - other.0) as f64;
    let dy = (self.1 - other.1) as f64;
    (dx * dx + dy * dy).sqrt()
  }
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_test_writer()
    .with_max_level(tracing::Level::TRACE)
    .try_init();
}

/// Graph where every road type travels at speed 1, so travel times equal lengths
pub fn unit_speed_graph() -> Graph<GridPoint> {
  Graph::with_speed_table(SpeedTable::new(1.0).unwrap())
}

pub fn grid_graph_from_edges(edges: &[((i32, i32), (i32, i32), f64)]) -> Graph<GridPoint> {
  let mut graph = unit_speed_graph();
  for ((x1, y1), (x2, y2), length) in edges {
    let from = GridPoint(*x1, *y1);
    let to = GridPoint(*x2, *y2);
    graph.add_vertex(from);
    graph.add_vertex(to);
    graph.add_edge(from, to, "", "road", *length).unwrap();
  }
  graph
}

fn add_two_way(graph: &mut Graph<GridPoint>, from: GridPoint, to: GridPoint, road_type: &str, length: f64) {
  graph.add_edge(from, to, "", road_type, length).unwrap();
  graph.add_edge(to, from, "", road_type, length).unwrap();
}

/// `width` x `height` lattice of two-way roads of length 1
pub fn grid_graph(width: i32, height: i32) -> Graph<GridPoint> {
  let mut graph = unit_speed_graph();
  lattice(&mut graph, width, height, |_, _, _| ("road", 1.0));
  graph
}

/// Lattice with mixed road classes timed by the global speed table. Every road is at least as
/// long as the straight line between its ends.
pub fn weighted_grid_graph(width: i32, height: i32) -> Graph<GridPoint> {
  const ROAD_TYPES: [&str; 5] = ["residential", "primary", "motorway", "trunk", "track"];
  let mut graph = Graph::new();
  lattice(&mut graph, width, height, |x, y, vertical| {
    let k = (x * 7 + y * 3 + if vertical { 2 } else { 0 }) as usize;
    (ROAD_TYPES[k % ROAD_TYPES.len()], 1.0 + (k % 4) as f64 * 0.1)
  });
  graph
}

fn lattice<F>(graph: &mut Graph<GridPoint>, width: i32, height: i32, road: F)
where
  F: Fn(i32, i32, bool) -> (&'static str, f64),
{
  for x in 0..width {
    for y in 0..height {
      graph.add_vertex(GridPoint(x, y));
    }
  }
  for x in 0..width {
    for y in 0..height {
      if x + 1 < width {
        let (road_type, length) = road(x, y, false);
        add_two_way(graph, GridPoint(x, y), GridPoint(x + 1, y), road_type, length);
      }
      if y + 1 < height {
        let (road_type, length) = road(x, y, true);
        add_two_way(graph, GridPoint(x, y), GridPoint(x, y + 1), road_type, length);
      }
    }
  }
}

/// A loop of three nodes around (0, 0) and a separate two-way road at (10, 10)
pub fn two_components() -> Graph<GridPoint> {
  let mut graph = grid_graph_from_edges(&[
    ((0, 0), (1, 0), 1.0),
    ((1, 0), (1, 1), 1.0),
    ((1, 1), (0, 0), 1.5),
    ((10, 10), (11, 10), 1.0),
  ]);
  graph
    .add_edge(GridPoint(11, 10), GridPoint(10, 10), "", "road", 1.0)
    .unwrap();
  graph
}

/// A spread of `(start, goal)` pairs over the vertices of `graph`
pub fn sample_queries(graph: &Graph<GridPoint>) -> Vec<(GridPoint, GridPoint)> {
  let mut vertices: Vec<_> = graph.vertices().collect();
  vertices.sort();
  let starts = vertices.iter().step_by(3);
  let goals = vertices.iter().rev().step_by(4);
  starts.zip(goals).map(|(start, goal)| (*start, *goal)).collect()
}

/// Runs the cached search entry point for `algorithm`
pub fn search<F: FnMut(GridPoint)>(
  graph: &mut Graph<GridPoint>,
  algorithm: Algorithm,
  start: GridPoint,
  goal: GridPoint,
  visit: F,
) -> Result<Option<Vec<GridPoint>>, GraphError> {
  match algorithm {
    Algorithm::Bfs => graph.bfs_with_observer(start, goal, visit),
    Algorithm::Dijkstra => graph.dijkstra_with_observer(start, goal, visit),
    Algorithm::AStar => graph.a_star_search_with_observer(start, goal, visit),
  }
}

/// Bellman-Ford over the given edge cost, independent from the searches under test
fn bellman_ford<F>(graph: &Graph<GridPoint>, start: GridPoint, goal: GridPoint, cost: F) -> Option<f64>
where
  F: Fn(&Edge<GridPoint>) -> f64,
{
  let vertices: Vec<_> = graph.vertices().collect();
  let mut best: HashMap<GridPoint, f64> = HashMap::new();
  best.insert(start, 0.0);

  for _ in 0..vertices.len() {
    for vertex in &vertices {
      let here = match best.get(vertex) {
        Some(distance) => *distance,
        None => continue,
      };
      for edge in graph.edges_from(*vertex) {
        let candidate = here + cost(edge);
        let current = best.entry(edge.to()).or_insert(f64::INFINITY);
        if candidate < *current {
          *current = candidate;
        }
      }
    }
  }
  best.get(&goal).copied()
}

pub fn min_edge_count(graph: &Graph<GridPoint>, start: GridPoint, goal: GridPoint) -> Option<usize> {
  bellman_ford(graph, start, goal, |_| 1.0).map(|hops| hops as usize)
}

pub fn min_travel_time(graph: &Graph<GridPoint>, start: GridPoint, goal: GridPoint) -> Option<f64> {
  bellman_ford(graph, start, goal, |edge| edge.time())
}
