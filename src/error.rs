//! Error types for topology construction and simulation setup.

use core::fmt;

/// Errors that can occur while building or mutating a simulation.
///
/// Failed operations leave the simulation untouched: no partial links or
/// half-rebuilt structures are ever left behind.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Lengths and spacings must be positive and finite.
    InvalidLength,
    /// The fixed time step must be positive and finite.
    InvalidTimeStep,
    /// The catch-up cap must be positive and finite.
    InvalidCatchUp,
    /// A rope needs at least two points.
    InsufficientPoints { count: usize },
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions,
    /// Linked structures must have the same number of points.
    InvalidTopology { expected: usize, found: usize },
    /// A point cannot be linked to itself.
    SelfLink { index: usize },
    /// Point index is out of bounds.
    PointOutOfBounds { index: usize, count: usize },
    /// The structure handle does not refer to a live structure.
    UnknownStructure,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidLength => write!(f, "length must be positive and finite"),
            PhysicsError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            PhysicsError::InvalidCatchUp => write!(f, "catch-up cap must be positive and finite"),
            PhysicsError::InsufficientPoints { count } => {
                write!(f, "rope needs at least 2 points (got {})", count)
            }
            PhysicsError::InvalidGridDimensions => write!(f, "grid must be at least 2x2"),
            PhysicsError::InvalidTopology { expected, found } => {
                write!(f, "linked structures must have equal point counts (expected {}, found {})", expected, found)
            }
            PhysicsError::SelfLink { index } => write!(f, "point {} cannot be linked to itself", index),
            PhysicsError::PointOutOfBounds { index, count } => {
                write!(f, "point index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::UnknownStructure => write!(f, "structure does not exist"),
        }
    }
}

impl core::error::Error for PhysicsError {}
