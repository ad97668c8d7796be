//! Symmetric link graph over an arena of points.
//!
//! Points are addressed by index into a contiguous slice. Every link is stored
//! once under its ordered `(low, high)` key, and both endpoints list each other
//! as neighbors.

use crate::error::PhysicsError;
use crate::float::Float;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec as AllocVec;

/// A spring-damper between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link<F: Float> {
    /// Lower point index.
    pub a: usize,
    /// Higher point index.
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
}

impl<F: Float> Link<F> {
    /// Endpoints are stored ordered, so `new(3, 1, ..)` links `1 -> 3`.
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F, damping: F) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Link { a, b, rest_length, stiffness, damping }
    }

    pub fn key(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// The same link with both endpoints shifted by `offset`.
    pub fn offset(&self, offset: usize) -> Self {
        Link { a: self.a + offset, b: self.b + offset, ..*self }
    }
}

/// Undirected adjacency relation with per-link spring parameters.
#[derive(Clone, Debug, Default)]
pub struct LinkGraph<F: Float> {
    neighbors: AllocVec<BTreeSet<usize>>,
    links: BTreeMap<(usize, usize), Link<F>>,
}

impl<F: Float> LinkGraph<F> {
    pub fn new(point_count: usize) -> Self {
        LinkGraph {
            neighbors: (0..point_count).map(|_| BTreeSet::new()).collect(),
            links: BTreeMap::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Register a link between two points.
    ///
    /// Returns `Ok(false)` if the pair was already linked; the existing link
    /// keeps its parameters.
    pub fn link(&mut self, link: Link<F>) -> Result<bool, PhysicsError> {
        let count = self.neighbors.len();
        for index in [link.a, link.b] {
            if index >= count {
                return Err(PhysicsError::PointOutOfBounds { index, count });
            }
        }
        if link.a == link.b {
            return Err(PhysicsError::SelfLink { index: link.a });
        }
        if self.links.contains_key(&link.key()) {
            return Ok(false);
        }

        self.neighbors[link.a].insert(link.b);
        self.neighbors[link.b].insert(link.a);
        self.links.insert(link.key(), link);
        Ok(true)
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.links.contains_key(&key)
    }

    pub fn get(&self, a: usize, b: usize) -> Option<&Link<F>> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.links.get(&key)
    }

    /// Neighbors of `index`, ascending. Empty for unknown indices.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(index).into_iter().flatten().copied()
    }

    /// Every link exactly once, ordered by `(a, b)`.
    pub fn iter(&self) -> impl Iterator<Item = &Link<F>> + '_ {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
