use crate::{Identifier, IntoWeightedNeighbors};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Copy, Clone, Debug)]
struct State<N: Identifier> {
  priority: f64,
  id: N,
}

impl<N: Identifier> Ord for State<N> {
  fn cmp(&self, other: &Self) -> Ordering {
    // Sorted desc
    other.priority.total_cmp(&self.priority)
  }
}

impl<N: Identifier> PartialOrd for State<N> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<N: Identifier> PartialEq for State<N> {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl<N: Identifier> Eq for State<N> {}

/// Best known way to reach a node in the current search.
#[derive(Copy, Clone, Debug)]
pub struct Label<N: Identifier> {
  pub distance: f64,
  pub estimate: f64,
  pub parent: N,
}

/// Scratch state of one weighted search.
///
/// Nodes without a label are at infinite distance. The frontier may hold several copies of a
/// node with different priorities; only the first one popped settles the node and later copies
/// are skipped.
pub struct SearchSpace<N: Identifier> {
  pq: BinaryHeap<State<N>>,
  labels: HashMap<N, Label<N>>,
  settled: HashSet<N>,
}

impl<N: Identifier> SearchSpace<N> {
  pub fn new() -> Self {
    SearchSpace {
      pq: BinaryHeap::new(),
      labels: HashMap::new(),
      settled: HashSet::new(),
    }
  }

  pub fn init(&mut self, node: N) {
    self.init_with_estimate(node, 0.0);
  }

  pub fn init_with_estimate(&mut self, node: N, estimate: f64) {
    self.resolve(node, node, 0.0, estimate);
  }

  pub fn label(&self, node: N) -> Option<&Label<N>> {
    self.labels.get(&node)
  }

  pub fn is_settled(&self, node: N) -> bool {
    self.settled.contains(&node)
  }

  pub fn num_settled(&self) -> usize {
    self.settled.len()
  }

  /// Pops the frontier until a node that is not settled yet comes up and settles it.
  ///
  /// Returns the node with its final distance, or `None` once the frontier is empty.
  pub fn settle_next(&mut self) -> Option<(N, f64)> {
    while let Some(State { id, .. }) = self.pq.pop() {
      if !self.settled.insert(id) {
        continue;
      }
      if let Some(label) = self.labels.get(&id) {
        return Some((id, label.distance));
      }
    }
    None
  }

  /// Relaxes the outgoing edges of a settled node. `estimate` gives the heuristic part of the
  /// priority for a node whose label is created or improved.
  pub fn relax<G, H>(&mut self, graph: G, node: N, distance: f64, estimate: H)
  where
    G: IntoWeightedNeighbors<NodeId = N>,
    H: Fn(N) -> f64,
  {
    for (target, cost) in graph.weighted_neighbors(node) {
      if self.is_settled(target) {
        continue;
      }
      let path_cost = distance + cost;
      if let Some(label) = self.labels.get(&target) {
        if path_cost >= label.distance {
          continue;
        }
      }
      self.resolve(target, node, path_cost, estimate(target));
    }
  }

  /// Parent chain from `node` back to the search origin, `node` first.
  pub fn unwind(&self, node: N) -> Vec<N> {
    let mut result: Vec<N> = Vec::new();

    let mut current_node = node;
    while let Some(label) = self.labels.get(&current_node) {
      result.push(current_node);
      if current_node == label.parent {
        break;
      }
      current_node = label.parent;
    }
    result
  }

  fn resolve(&mut self, node: N, parent_node: N, distance: f64, estimate: f64) {
    self.labels.insert(
      node,
      Label {
        distance,
        estimate,
        parent: parent_node,
      },
    );
    self.pq.push(State {
      priority: distance + estimate,
      id: node,
    });
  }
}
