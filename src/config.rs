//! Configuration types for the force model and the simulation loop.

use crate::float::Float;
use crate::integrator::IntegratorKind;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// An infinite ground plane given by a point on it and its outward normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundPlane<V: Vec> {
    pub point: V,
    /// Unit length.
    pub normal: V,
}

impl<V: Vec> GroundPlane<V> {
    /// The normal is normalized here.
    pub fn new(point: V, normal: V) -> Self {
        GroundPlane { point, normal: normal.normalize() }
    }

    /// Distance from the plane along its normal; negative below the surface.
    pub fn signed_distance(&self, position: V) -> V::Scalar {
        self.normal.dot(position - self.point)
    }
}

/// Parameters of the force pipeline.
///
/// # Builder Pattern
/// ```
/// use ropenet::config::{ForceConfig, GroundPlane};
/// use ropenet::vec::Vec3;
///
/// let config: ForceConfig<Vec3<f64>> = ForceConfig::new()
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_ground_plane(GroundPlane::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)))
///     .with_air_friction(0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConfig<V: Vec> {
    /// Gravity acceleration vector. Default: zero (no gravity).
    pub gravity: V,
    /// Ground planes; each contributes independently. Default: none.
    pub ground_planes: AllocVec<GroundPlane<V>>,
    /// Outward spring constant of ground contact. Default: 800.
    pub ground_stiffness: V::Scalar,
    /// Velocity damping while in ground contact. Default: 5.
    pub ground_damping: V::Scalar,
    /// Linear air drag coefficient. Default: 1.
    pub air_friction: V::Scalar,
    /// Stiffness of links created with `Simulation::link`. Default: 800.
    pub spring_stiffness: V::Scalar,
    /// Damping of links created with `Simulation::link`. Default: 7.
    pub spring_damping: V::Scalar,
    /// Scale applied to forwarded collision forces. Default: 1.
    pub collision_damping_factor: V::Scalar,
}

impl<V: Vec> ForceConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ForceConfig {
            gravity: V::zero(),
            ground_planes: AllocVec::new(),
            ground_stiffness: V::Scalar::from_f32(800.0),
            ground_damping: V::Scalar::from_f32(5.0),
            air_friction: V::Scalar::one(),
            spring_stiffness: V::Scalar::from_f32(800.0),
            spring_damping: V::Scalar::from_f32(7.0),
            collision_damping_factor: V::Scalar::one(),
        }
    }

    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_ground_plane(mut self, plane: GroundPlane<V>) -> Self {
        self.ground_planes.push(plane);
        self
    }

    pub fn with_ground(mut self, stiffness: V::Scalar, damping: V::Scalar) -> Self {
        self.ground_stiffness = stiffness;
        self.ground_damping = damping;
        self
    }

    pub fn with_air_friction(mut self, air_friction: V::Scalar) -> Self {
        self.air_friction = air_friction;
        self
    }

    pub fn with_spring(mut self, stiffness: V::Scalar, damping: V::Scalar) -> Self {
        self.spring_stiffness = stiffness;
        self.spring_damping = damping;
        self
    }

    pub fn with_collision_damping_factor(mut self, factor: V::Scalar) -> Self {
        self.collision_damping_factor = factor;
        self
    }
}

impl<V: Vec> Default for ForceConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration of a [`Simulation`](crate::simulation::Simulation).
///
/// # Builder Pattern
/// ```
/// use ropenet::config::SimulationConfig;
/// use ropenet::integrator::IntegratorKind;
/// use ropenet::vec::Vec3;
///
/// let config: SimulationConfig<Vec3<f64>> = SimulationConfig::new()
///     .with_integrator(IntegratorKind::Rk4)
///     .with_time_step(1.0 / 120.0)
///     .with_max_catch_up(3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig<V: Vec> {
    pub force: ForceConfig<V>,
    /// Integration algorithm. Default: Euler.
    pub integrator: IntegratorKind,
    /// Fixed physics step in seconds. Default: 1/60.
    pub time_step: V::Scalar,
    /// Most fixed steps a single frame may schedule. Must be positive and
    /// finite. Default: 3.
    pub max_catch_up: V::Scalar,
}

impl<V: Vec> SimulationConfig<V> {
    pub fn new() -> Self {
        SimulationConfig {
            force: ForceConfig::new(),
            integrator: IntegratorKind::Euler,
            time_step: V::Scalar::one() / V::Scalar::from_f32(60.0),
            max_catch_up: V::Scalar::from_f32(3.0),
        }
    }

    pub fn with_force(mut self, force: ForceConfig<V>) -> Self {
        self.force = force;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_time_step(mut self, time_step: V::Scalar) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_catch_up(mut self, max_catch_up: V::Scalar) -> Self {
        self.max_catch_up = max_catch_up;
        self
    }
}

impl<V: Vec> Default for SimulationConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}
