//! Point masses: the atomic unit of ropes and nets.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec;

/// Dynamic state of a point, saved and restored by multi-stage integrators.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointState<V: Vec> {
    pub position: V,
    pub velocity: V,
}

impl<V: Vec> PointState<V> {
    pub fn new(position: V, velocity: V) -> Self {
        PointState { position, velocity }
    }
}

/// A simulated mass with position, velocity and a force accumulator.
///
/// Anchored points are kinematic: forces are ignored and the integrators leave
/// them alone. The force model snaps them onto their anchor target instead.
#[derive(Clone, Debug)]
pub struct Point<V: Vec> {
    pub position: V,
    pub velocity: V,
    /// Contact radius used against ground planes.
    pub radius: V::Scalar,
    force: V,
    mass: V::Scalar,
    anchor: Option<V>,
    pending_collision: V,
}

impl<V: Vec> Point<V> {
    /// Create a free point at rest.
    pub fn new(position: V, mass: V::Scalar) -> Result<Self, PhysicsError> {
        if !mass.is_positive_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(Point {
            position,
            velocity: V::zero(),
            radius: V::Scalar::zero(),
            force: V::zero(),
            mass,
            anchor: None,
            pending_collision: V::zero(),
        })
    }

    /// Create a point anchored at its own position.
    pub fn anchored(position: V, mass: V::Scalar) -> Result<Self, PhysicsError> {
        let mut point = Self::new(position, mass)?;
        point.anchor = Some(position);
        Ok(point)
    }

    pub fn with_radius(mut self, radius: V::Scalar) -> Self {
        self.radius = radius;
        self
    }

    pub fn mass(&self) -> V::Scalar {
        self.mass
    }

    /// Sum of all forces applied since the last [`clear_force`](Self::clear_force).
    pub fn force(&self) -> V {
        self.force
    }

    pub fn state(&self) -> PointState<V> {
        PointState::new(self.position, self.velocity)
    }

    pub fn set_state(&mut self, state: PointState<V>) {
        self.position = state.position;
        self.velocity = state.velocity;
    }

    pub fn clear_force(&mut self) {
        self.force = V::zero();
    }

    /// Accumulate a force. Anchored points ignore it.
    pub fn apply_force(&mut self, force: V) {
        if self.anchor.is_none() {
            self.force = self.force + force;
        }
    }

    /// Queue a one-shot collision force, consumed by the next force pass.
    /// Overlapping collisions add up.
    pub fn queue_collision_force(&mut self, force: V) {
        self.pending_collision = self.pending_collision + force;
    }

    pub fn pending_collision_force(&self) -> V {
        self.pending_collision
    }

    /// Apply the queued collision force and clear the queue.
    pub fn apply_collision_force(&mut self) {
        let pending = self.pending_collision;
        self.pending_collision = V::zero();
        self.apply_force(pending);
    }

    /// Force divided by mass.
    pub fn acceleration(&self) -> V {
        self.force.scale(V::Scalar::one() / self.mass)
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor_target(&self) -> Option<V> {
        self.anchor
    }

    /// Make the point kinematic and follow `target`.
    pub fn anchor_to(&mut self, target: V) {
        self.anchor = Some(target);
        self.force = V::zero();
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    /// Snap an anchored point onto its target with zero velocity.
    pub fn constrain_to_anchor(&mut self) {
        if let Some(target) = self.anchor {
            self.velocity = V::zero();
            self.position = target;
        }
    }

    pub fn kinetic_energy(&self) -> V::Scalar {
        V::Scalar::half() * self.mass * self.velocity.length_sq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn rejects_non_positive_mass() {
        let origin = Vec3::new(0.0f64, 0.0, 0.0);
        assert_eq!(Point::new(origin, 0.0).unwrap_err(), PhysicsError::InvalidMass);
        assert_eq!(Point::new(origin, -1.0).unwrap_err(), PhysicsError::InvalidMass);
        assert_eq!(Point::new(origin, f64::NAN).unwrap_err(), PhysicsError::InvalidMass);
    }

    #[test]
    fn anchored_point_ignores_forces() {
        let mut p = Point::anchored(Vec3::new(1.0f64, 2.0, 3.0), 1.0).unwrap();
        p.apply_force(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(p.force(), Vec3::zero());
    }

    #[test]
    fn collision_force_is_consumed_once() {
        let mut p = Point::new(Vec3::new(0.0f64, 0.0, 0.0), 2.0).unwrap();
        p.queue_collision_force(Vec3::new(1.0, 0.0, 0.0));
        p.queue_collision_force(Vec3::new(0.5, 0.0, 0.0));

        p.apply_collision_force();
        assert_eq!(p.force(), Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(p.pending_collision_force(), Vec3::zero());

        p.apply_collision_force();
        assert_eq!(p.force(), Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn constrain_snaps_to_target() {
        let mut p = Point::new(Vec3::new(0.0f64, 0.0, 0.0), 1.0).unwrap();
        p.velocity = Vec3::new(3.0, 3.0, 3.0);
        p.anchor_to(Vec3::new(5.0, 6.0, 7.0));
        p.constrain_to_anchor();
        assert_eq!(p.position, Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(p.velocity, Vec3::zero());
    }
}
