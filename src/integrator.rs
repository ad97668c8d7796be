//! Time integrators advancing point state by one fixed step.
//!
//! All integrators share one contract: they call `update_forces(points, h)` to
//! populate every point's force accumulator before reading it, then move
//! positions and velocities in place. Anchored points are kinematic and are
//! never integrated.

use crate::float::Float;
use crate::point::Point;
use crate::rk4::Rk4Integrator;
use crate::vec::Vec;

/// The closed set of integration algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntegratorKind {
    /// Semi-implicit Euler: velocity first, then position.
    #[default]
    Euler,
    /// Kick-drift-kick leapfrog.
    Leapfrog,
    /// Classic fourth-order Runge-Kutta.
    Rk4,
}

/// Dispatches [`IntegratorKind`] and owns the RK4 staging buffers.
#[derive(Clone, Debug, Default)]
pub struct Integrator<V: Vec> {
    kind: IntegratorKind,
    rk4: Rk4Integrator<V>,
}

impl<V: Vec> Integrator<V> {
    pub fn new(kind: IntegratorKind) -> Self {
        Integrator { kind, rk4: Rk4Integrator::new() }
    }

    pub fn kind(&self) -> IntegratorKind {
        self.kind
    }

    /// Switch algorithms. RK4 staging is kept for reuse.
    pub fn set_kind(&mut self, kind: IntegratorKind) {
        self.kind = kind;
    }

    pub fn rk4(&self) -> &Rk4Integrator<V> {
        &self.rk4
    }

    /// Advance every point by `dt`.
    ///
    /// The point count must not change during the call.
    pub fn advance(
        &mut self,
        points: &mut [Point<V>],
        update_forces: impl FnMut(&mut [Point<V>], V::Scalar),
        dt: V::Scalar,
    ) {
        match self.kind {
            IntegratorKind::Euler => euler(points, update_forces, dt),
            IntegratorKind::Leapfrog => leapfrog(points, update_forces, dt),
            IntegratorKind::Rk4 => self.rk4.advance(points, update_forces, dt),
        }
    }
}

/// Semi-implicit Euler. `v += dt/m * F` is applied before `p += dt * v`.
pub fn euler<V: Vec>(
    points: &mut [Point<V>],
    mut update_forces: impl FnMut(&mut [Point<V>], V::Scalar),
    dt: V::Scalar,
) {
    update_forces(points, dt);

    for p in points.iter_mut().filter(|p| !p.is_anchored()) {
        p.velocity = p.velocity + p.force().scale(dt / p.mass());
        p.position = p.position + p.velocity.scale(dt);
    }
}

/// Leapfrog in kick-drift-kick form: half-step velocity kick, full position
/// drift, fresh force evaluation, second half-step kick.
pub fn leapfrog<V: Vec>(
    points: &mut [Point<V>],
    mut update_forces: impl FnMut(&mut [Point<V>], V::Scalar),
    dt: V::Scalar,
) {
    let half_dt = dt * V::Scalar::half();

    update_forces(points, dt);
    kick(points, half_dt);
    for p in points.iter_mut().filter(|p| !p.is_anchored()) {
        p.position = p.position + p.velocity.scale(dt);
    }

    update_forces(points, dt);
    kick(points, half_dt);
}

fn kick<V: Vec>(points: &mut [Point<V>], h: V::Scalar) {
    for p in points.iter_mut().filter(|p| !p.is_anchored()) {
        p.velocity = p.velocity + p.acceleration().scale(h);
    }
}
