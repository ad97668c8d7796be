//! Ropes: chains of point masses joined by spring-dampers.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::link::{Link, LinkGraph};
use crate::point::Point;
use crate::topology::Topology;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Configuration for a rope.
///
/// Points are laid out from `root_anchor` (or `origin`) towards `end_anchor`
/// when one is set, otherwise along `direction`. `mass` is the total mass,
/// shared evenly between points.
#[derive(Clone, Debug, PartialEq)]
pub struct RopeConfig<V: Vec> {
    pub point_count: usize,
    pub total_length: V::Scalar,
    pub mass: V::Scalar,
    pub stiffness: V::Scalar,
    pub damping: V::Scalar,
    pub point_radius: V::Scalar,
    pub origin: V,
    pub direction: V,
    /// Pins point 0 when set.
    pub root_anchor: Option<V>,
    /// Pins the last point when set.
    pub end_anchor: Option<V>,
}

impl<V: Vec> RopeConfig<V> {
    pub fn new(origin: V, direction: V) -> Self {
        RopeConfig {
            point_count: 10,
            total_length: V::Scalar::two(),
            mass: V::Scalar::one(),
            stiffness: V::Scalar::from_f32(800.0),
            damping: V::Scalar::from_f32(7.0),
            point_radius: V::Scalar::from_f32(0.1),
            origin,
            direction,
            root_anchor: None,
            end_anchor: None,
        }
    }

    /// A rope pinned at both ends, spanning `root -> end`.
    pub fn between(root: V, end: V) -> Self {
        let mut config = Self::new(root, end - root);
        config.total_length = root.distance(end);
        config.root_anchor = Some(root);
        config.end_anchor = Some(end);
        config
    }

    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_length(mut self, total_length: V::Scalar) -> Self {
        self.total_length = total_length;
        self
    }

    pub fn with_mass(mut self, mass: V::Scalar) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_spring(mut self, stiffness: V::Scalar, damping: V::Scalar) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }

    pub fn with_point_radius(mut self, radius: V::Scalar) -> Self {
        self.point_radius = radius;
        self
    }

    pub fn with_root_anchor(mut self, anchor: V) -> Self {
        self.root_anchor = Some(anchor);
        self
    }

    pub fn with_end_anchor(mut self, anchor: V) -> Self {
        self.end_anchor = Some(anchor);
        self
    }

    /// Rest length between neighboring points.
    pub fn segment_length(&self) -> V::Scalar {
        self.total_length / V::Scalar::from_usize(self.point_count.saturating_sub(1).max(1))
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.point_count < 2 {
            return Err(PhysicsError::InsufficientPoints { count: self.point_count });
        }
        if !self.total_length.is_positive_finite() {
            return Err(PhysicsError::InvalidLength);
        }
        if !self.mass.is_positive_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(())
    }

    fn layout(&self) -> (V, V) {
        let start = self.root_anchor.unwrap_or(self.origin);
        let towards_end = self
            .end_anchor
            .map(|end| (end - start).normalize())
            .filter(|dir| *dir != V::zero());
        (start, towards_end.unwrap_or_else(|| self.direction.normalize()))
    }
}

impl<V: Vec> Topology<V> {
    /// Build a rope: evenly spaced points, each linked to the next.
    pub fn rope(config: &RopeConfig<V>) -> Result<Self, PhysicsError> {
        config.validate()?;

        let n = config.point_count;
        let segment = config.segment_length();
        let point_mass = config.mass / V::Scalar::from_usize(n);
        let (start, dir) = config.layout();

        let mut points = AllocVec::with_capacity(n);
        for i in 0..n {
            let pos = start + dir.scale(segment * V::Scalar::from_usize(i));
            points.push(Point::new(pos, point_mass)?.with_radius(config.point_radius));
        }
        if let Some(root) = config.root_anchor {
            points[0].anchor_to(root);
        }
        if let Some(end) = config.end_anchor {
            points[n - 1].anchor_to(end);
        }
        for p in points.iter_mut() {
            p.constrain_to_anchor();
        }

        let mut links = LinkGraph::new(n);
        for i in 0..n - 1 {
            links.link(Link::new(i, i + 1, segment, config.stiffness, config.damping))?;
        }

        log::debug!("built rope with {} points, segment length {:?}", n, segment);
        Ok(Topology { points, links })
    }
}
