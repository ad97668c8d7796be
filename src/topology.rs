//! Topologies: the points of one rope or net together with their link graph.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::link::LinkGraph;
use crate::net::NetConfig;
use crate::point::Point;
use crate::rope::RopeConfig;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Points of a single structure and the links between them, indexed locally.
#[derive(Clone, Debug)]
pub struct Topology<V: Vec> {
    pub points: AllocVec<Point<V>>,
    pub links: LinkGraph<V::Scalar>,
}

impl<V: Vec> Topology<V> {
    /// Build a fresh topology. Same config in, same topology out.
    pub fn build(config: &StructureConfig<V>) -> Result<Self, PhysicsError> {
        match config {
            StructureConfig::Rope(rope) => Self::rope(rope),
            StructureConfig::Net(net) => Self::net(net),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_mass(&self) -> V::Scalar {
        self.points.iter().fold(V::Scalar::zero(), |acc, p| acc + p.mass())
    }
}

/// Spring parameters used when a structure is linked to another one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkParameters<F: Float> {
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
}

/// Structural parameters of a rope or a net. Changing any of them requires a
/// rebuild.
#[derive(Clone, Debug, PartialEq)]
pub enum StructureConfig<V: Vec> {
    Rope(RopeConfig<V>),
    Net(NetConfig<V>),
}

impl<V: Vec> StructureConfig<V> {
    pub fn point_count(&self) -> usize {
        match self {
            StructureConfig::Rope(rope) => rope.point_count,
            StructureConfig::Net(net) => net.rows * net.cols,
        }
    }

    pub fn link_parameters(&self) -> LinkParameters<V::Scalar> {
        match self {
            StructureConfig::Rope(rope) => LinkParameters {
                rest_length: rope.segment_length(),
                stiffness: rope.stiffness,
                damping: rope.damping,
            },
            StructureConfig::Net(net) => LinkParameters {
                rest_length: net.spacing,
                stiffness: net.stiffness,
                damping: net.damping,
            },
        }
    }
}

impl<V: Vec> From<RopeConfig<V>> for StructureConfig<V> {
    fn from(config: RopeConfig<V>) -> Self {
        StructureConfig::Rope(config)
    }
}

impl<V: Vec> From<NetConfig<V>> for StructureConfig<V> {
    fn from(config: NetConfig<V>) -> Self {
        StructureConfig::Net(config)
    }
}
