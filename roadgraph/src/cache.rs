//! Memoized search results.

use crate::Identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Search algorithm that produced a cached path
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
  Bfs,
  Dijkstra,
  AStar,
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Algorithm::Bfs => "bfs",
      Algorithm::Dijkstra => "dijkstra",
      Algorithm::AStar => "a_star",
    };
    f.write_str(name)
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey<P: Identifier> {
  pub algorithm: Algorithm,
  pub start: P,
  pub goal: P,
}

impl<P: Identifier> CacheKey<P> {
  pub fn new(algorithm: Algorithm, start: P, goal: P) -> Self {
    CacheKey {
      algorithm,
      start,
      goal,
    }
  }
}

/// Paths found so far, one per `(algorithm, start, goal)`.
///
/// Entries live as long as the cache: there is no eviction, no size bound and no invalidation
/// when the graph changes afterwards.
#[derive(Clone, Debug)]
pub struct PathCache<P: Identifier> {
  paths: HashMap<CacheKey<P>, Vec<P>>,
}

impl<P: Identifier> PathCache<P> {
  pub fn new() -> Self {
    PathCache {
      paths: HashMap::new(),
    }
  }

  /// `None` if the query was never stored. A stored empty path is returned as `Some(&[])`.
  pub fn get(&self, key: &CacheKey<P>) -> Option<&[P]> {
    self.paths.get(key).map(|path| path.as_slice())
  }

  pub fn insert(&mut self, key: CacheKey<P>, path: Vec<P>) {
    self.paths.insert(key, path);
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }
}

impl<P: Identifier> Default for PathCache<P> {
  fn default() -> Self {
    PathCache::new()
  }
}
