//! .
//!
//! Append-only point k-d tree over accepted discs. Arena order is insertion
//! order; nodes are never moved, mutated or deleted. Splits alternate between
//! x and y with depth, ties go right. Frontier picks are uniform random, so
//! insertions arrive in random geometric order and the expected depth stays
//! logarithmic without rebalancing.

use {
  crate::geometry::{contains_inclusive, Disc, WorldSpace},
  euclid::Box2D,
  std::fmt::{Debug, Formatter}
};

#[derive(Copy, Clone)]
struct Node {
  disc: Disc,
  /// arena ids, `[less, greater or equal]`
  children: [Option<u32>; 2]
}

#[derive(Clone, Default)]
pub struct KdTree {
  nodes: Vec<Node>
}

impl KdTree {
  pub fn new() -> Self {
    Self { nodes: vec![] }
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// append `disc`, linking it below the existing nodes
  pub fn insert(&mut self, disc: Disc) {
    let id = self.nodes.len() as u32;
    self.nodes.push(Node { disc, children: [None, None] });
    if id == 0 {
      return
    }

    let mut node = 0usize;
    let mut axis = 0;
    loop {
      let side = (axis_key(&disc, axis) >= axis_key(&self.nodes[node].disc, axis)) as usize;
      match self.nodes[node].children[side] {
        Some(child) => node = child as usize,
        None => {
          self.nodes[node].children[side] = Some(id);
          return
        }
      }
      axis ^= 1;
    }
  }

  /// Discs whose centers lie in `rect`, all four bounds inclusive.
  ///
  /// Lazy; visits only subtrees the rectangle can reach, so a query touching
  /// `k` of `n` discs costs `O(log n + k)` on average.
  pub fn range_query(&self, rect: Box2D<f64, WorldSpace>) -> RangeQuery<'_> {
    RangeQuery {
      tree: self,
      stack: if self.nodes.is_empty() { vec![] } else { vec![(0, 0)] },
      rect
    }
  }

  /// all discs, in insertion order
  pub fn iter(&self) -> impl Iterator<Item = &Disc> + '_ {
    self.nodes.iter().map(|node| &node.disc)
  }

  fn max_depth(&self) -> u32 {
    let mut max_depth = 0;
    let mut stack = vec![];
    if !self.nodes.is_empty() {
      stack.push((0u32, 1u32));
    }
    while let Some((id, depth)) = stack.pop() {
      max_depth = depth.max(max_depth);
      for child in self.nodes[id as usize].children.into_iter().flatten() {
        stack.push((child, depth + 1));
      }
    }
    max_depth
  }
}

fn axis_key(disc: &Disc, axis: usize) -> f64 {
  match axis {
    0 => disc.xy.x,
    _ => disc.xy.y
  }
}

impl Debug for KdTree {
  /// total nodes, max depth, and memory usage
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    use humansize::{FileSize, file_size_opts as options};

    f.debug_struct("KdTree")
      .field("total_nodes", &self.nodes.len())
      .field("max_depth", &self.max_depth())
      .field("memory", &(self.nodes.len() * std::mem::size_of::<Node>())
        .file_size(options::BINARY).map_err(|_| std::fmt::Error)?)
      .finish()
  }
}

pub struct RangeQuery<'a> {
  tree: &'a KdTree,
  /// arena id and split axis of nodes still to visit
  stack: Vec<(u32, usize)>,
  rect: Box2D<f64, WorldSpace>
}

impl<'a> Iterator for RangeQuery<'a> {
  type Item = &'a Disc;

  fn next(&mut self) -> Option<&'a Disc> {
    while let Some((id, axis)) = self.stack.pop() {
      let node = &self.tree.nodes[id as usize];
      let key = axis_key(&node.disc, axis);
      let (min, max) = match axis {
        0 => (self.rect.min.x, self.rect.max.x),
        _ => (self.rect.min.y, self.rect.max.y)
      };
      // left holds keys < key, right holds keys >= key
      if min < key {
        if let Some(less) = node.children[0] {
          self.stack.push((less, axis ^ 1));
        }
      }
      if max >= key {
        if let Some(greater) = node.children[1] {
          self.stack.push((greater, axis ^ 1));
        }
      }
      if contains_inclusive(&self.rect, node.disc.xy) {
        return Some(&node.disc)
      }
    }
    None
  }
}
