use super::edge::Edge;
use crate::Identifier;

/// An intersection and the road segments leaving it, in insertion order.
#[derive(Clone, Debug)]
pub struct Node<P: Identifier> {
  point: P,
  out_edges: Vec<Edge<P>>,
}

impl<P: Identifier> Node<P> {
  pub(crate) fn new(point: P) -> Self {
    Node {
      point,
      out_edges: Vec::new(),
    }
  }

  pub(crate) fn add_edge(&mut self, edge: Edge<P>) {
    self.out_edges.push(edge);
  }

  pub fn point(&self) -> P {
    self.point
  }

  pub fn edges(&self) -> &[Edge<P>] {
    &self.out_edges
  }

  pub fn out_degree(&self) -> usize {
    self.out_edges.len()
  }
}
