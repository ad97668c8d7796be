//! Mass-spring physics for ropes and nets.
//!
//! `ropenet` simulates point masses joined by spring-damper links. Ropes are
//! chains of points, nets are rectangular grids, and both live in one shared
//! point arena owned by a [`Simulation`] so they can be linked to each other.
//!
//! # Features
//!
//! - **Force model**: Gravity, ground planes, air drag, spring-damper links and forwarded rigid-body contacts
//! - **Integrators**: Semi-implicit Euler, kick-drift-kick leapfrog and classic RK4
//! - **Anchors**: Pinned points follow a target and are never integrated
//! - **Fixed step**: Frame-time accumulator with a catch-up cap
//! - **Observable**: Count force evaluations and steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use ropenet::{ForceConfig, NoOpStepObserver, RopeConfig, Simulation, SimulationConfig, Vec3};
//!
//! let config = SimulationConfig::new()
//!     .with_force(ForceConfig::new().with_gravity(Vec3::new(0.0, -9.81, 0.0)));
//! let mut sim: Simulation<Vec3<f64>> = Simulation::new(config).unwrap();
//!
//! let rope = RopeConfig::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
//!     .with_point_count(8)
//!     .with_root_anchor(Vec3::new(0.0, 5.0, 0.0));
//! let id = sim.add(rope).unwrap();
//!
//! sim.tick(1.0 / 60.0, &mut NoOpStepObserver);
//! assert_eq!(sim.structure_points(id).unwrap()[0].position, Vec3::new(0.0, 5.0, 0.0));
//! ```

#![no_std]

extern crate alloc;

pub mod accumulator;
pub mod config;
pub mod error;
pub mod float;
pub mod force;
pub mod integrator;
pub mod link;
pub mod net;
pub mod observer;
pub mod point;
pub mod rk4;
pub mod rope;
pub mod simulation;
pub mod topology;
pub mod vec;

// Re-export primary API
pub use accumulator::FixedStepAccumulator;
pub use config::{ForceConfig, GroundPlane, SimulationConfig};
pub use error::PhysicsError;
pub use float::Float;
pub use integrator::{Integrator, IntegratorKind};
pub use link::{Link, LinkGraph};
pub use net::NetConfig;
pub use observer::{NoOpStepObserver, StepObserver};
pub use point::{Point, PointState};
pub use rk4::Rk4Integrator;
pub use rope::RopeConfig;
pub use simulation::{CollisionEvent, PointRef, Simulation, StructureId};
pub use topology::{LinkParameters, StructureConfig, Topology};
pub use vec::{Vec, Vec2, Vec3};
