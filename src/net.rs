//! Nets: grids of point masses linked to their row and column neighbors.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::link::{Link, LinkGraph};
use crate::point::Point;
use crate::topology::Topology;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Configuration for a net.
///
/// The point at (row, col) has index `row * cols + col` and sits at
/// `origin + row_axis * row * spacing + col_axis * col * spacing`.
/// The four corners are anchored at their initial positions.
#[derive(Clone, Debug, PartialEq)]
pub struct NetConfig<V: Vec> {
    pub rows: usize,
    pub cols: usize,
    pub spacing: V::Scalar,
    /// Total mass, shared evenly between points.
    pub mass: V::Scalar,
    pub stiffness: V::Scalar,
    pub damping: V::Scalar,
    pub point_radius: V::Scalar,
    pub origin: V,
    pub row_axis: V,
    pub col_axis: V,
}

impl<V: Vec> NetConfig<V> {
    pub fn new(origin: V, row_axis: V, col_axis: V) -> Self {
        NetConfig {
            rows: 10,
            cols: 10,
            spacing: V::Scalar::from_f32(0.2),
            mass: V::Scalar::one(),
            stiffness: V::Scalar::from_f32(800.0),
            damping: V::Scalar::from_f32(7.0),
            point_radius: V::Scalar::from_f32(0.1),
            origin,
            row_axis,
            col_axis,
        }
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_spacing(mut self, spacing: V::Scalar) -> Self {
        self.spacing = spacing;
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

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn corners(&self) -> [usize; 4] {
        let (last_row, last_col) = (self.rows - 1, self.cols - 1);
        [
            self.index(0, 0),
            self.index(0, last_col),
            self.index(last_row, 0),
            self.index(last_row, last_col),
        ]
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(PhysicsError::InvalidGridDimensions);
        }
        if !self.spacing.is_positive_finite() {
            return Err(PhysicsError::InvalidLength);
        }
        if !self.mass.is_positive_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(())
    }
}

impl<V: Vec> Topology<V> {
    /// Build a net with anchored corners.
    pub fn net(config: &NetConfig<V>) -> Result<Self, PhysicsError> {
        config.validate()?;

        let (rows, cols) = (config.rows, config.cols);
        let point_mass = config.mass / V::Scalar::from_usize(rows * cols);
        let row_step = config.row_axis.normalize().scale(config.spacing);
        let col_step = config.col_axis.normalize().scale(config.spacing);

        let mut points = AllocVec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = config.origin
                    + row_step.scale(V::Scalar::from_usize(row))
                    + col_step.scale(V::Scalar::from_usize(col));
                points.push(Point::new(pos, point_mass)?.with_radius(config.point_radius));
            }
        }
        for corner in config.corners() {
            let target = points[corner].position;
            points[corner].anchor_to(target);
        }

        let mut links = LinkGraph::new(rows * cols);
        let link = |a, b| Link::new(a, b, config.spacing, config.stiffness, config.damping);
        for row in 0..rows {
            for col in 0..cols - 1 {
                links.link(link(config.index(row, col), config.index(row, col + 1)))?;
            }
        }
        for row in 0..rows - 1 {
            for col in 0..cols {
                links.link(link(config.index(row, col), config.index(row + 1, col)))?;
            }
        }

        log::debug!("built {}x{} net with {} links", rows, cols, links.len());
        Ok(Topology { points, links })
    }
}
