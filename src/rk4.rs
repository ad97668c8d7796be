//! Fourth-order Runge-Kutta with per-point staging buffers.

use crate::float::Float;
use crate::point::{Point, PointState};
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Time derivative of a point state sampled at one stage.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Derivative<V: Vec> {
    pub delta_position: V,
    pub delta_velocity: V,
}

impl<V: Vec> Derivative<V> {
    fn weighted_sum(a: Self, b: Self, c: Self, d: Self) -> Self {
        let two = V::Scalar::two();
        let sixth = V::Scalar::one() / V::Scalar::from_f32(6.0);
        Derivative {
            delta_position: (a.delta_position + (b.delta_position + c.delta_position).scale(two) + d.delta_position)
                .scale(sixth),
            delta_velocity: (a.delta_velocity + (b.delta_velocity + c.delta_velocity).scale(two) + d.delta_velocity)
                .scale(sixth),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Stages<V: Vec> {
    eval: Derivative<V>,
    a: Derivative<V>,
    b: Derivative<V>,
    c: Derivative<V>,
    d: Derivative<V>,
    saved: PointState<V>,
}

impl<V: Vec> Stages<V> {
    fn reset(&mut self) {
        self.eval = Derivative::default();
        self.a = Derivative::default();
        self.b = Derivative::default();
        self.c = Derivative::default();
        self.d = Derivative::default();
    }
}

/// RK4 integrator.
///
/// Each stage saves the point state, perturbs it along the previous stage's
/// derivative, evaluates forces, records the new derivative and restores the
/// saved state, so every stage is sampled from the state at the start of the
/// step. Staging slots only ever grow.
#[derive(Clone, Debug, Default)]
pub struct Rk4Integrator<V: Vec> {
    stages: AllocVec<Stages<V>>,
}

impl<V: Vec> Rk4Integrator<V> {
    pub fn new() -> Self {
        Rk4Integrator { stages: AllocVec::new() }
    }

    /// Number of allocated staging slots.
    pub fn capacity(&self) -> usize {
        self.stages.len()
    }

    /// State of point `index` at the start of the last `advance` call.
    /// Anchored points are snapshotted before the first force pass can move
    /// them onto a new target.
    pub fn saved_state(&self, index: usize) -> Option<PointState<V>> {
        self.stages.get(index).map(|s| s.saved)
    }

    pub fn advance(
        &mut self,
        points: &mut [Point<V>],
        mut update_forces: impl FnMut(&mut [Point<V>], V::Scalar),
        dt: V::Scalar,
    ) {
        self.prepare(points.len());
        assert!(
            self.stages.len() >= points.len(),
            "RK4 staging has {} slots for {} points",
            self.stages.len(),
            points.len(),
        );

        let half_dt = dt * V::Scalar::half();

        for (p, s) in points.iter().zip(self.stages.iter_mut()) {
            s.saved = p.state();
        }
        self.evaluate(points, &mut update_forces, V::Scalar::zero());
        self.stages.iter_mut().for_each(|s| s.a = s.eval);

        self.evaluate(points, &mut update_forces, half_dt);
        self.stages.iter_mut().for_each(|s| s.b = s.eval);

        self.evaluate(points, &mut update_forces, half_dt);
        self.stages.iter_mut().for_each(|s| s.c = s.eval);

        self.evaluate(points, &mut update_forces, dt);
        self.stages.iter_mut().for_each(|s| s.d = s.eval);

        for (p, s) in points.iter_mut().zip(self.stages.iter()) {
            if p.is_anchored() {
                continue;
            }
            let delta = Derivative::weighted_sum(s.a, s.b, s.c, s.d);
            p.position = p.position + delta.delta_position.scale(dt);
            p.velocity = p.velocity + delta.delta_velocity.scale(dt);
        }
    }

    fn evaluate(
        &mut self,
        points: &mut [Point<V>],
        update_forces: &mut impl FnMut(&mut [Point<V>], V::Scalar),
        h: V::Scalar,
    ) {
        for (p, s) in points.iter_mut().zip(self.stages.iter_mut()) {
            if !p.is_anchored() {
                s.saved = p.state();
                p.position = p.position + s.eval.delta_position.scale(h);
                p.velocity = p.velocity + s.eval.delta_velocity.scale(h);
            }
        }

        update_forces(points, h);

        for (p, s) in points.iter_mut().zip(self.stages.iter_mut()) {
            s.eval = Derivative {
                delta_position: p.velocity,
                delta_velocity: p.acceleration(),
            };
            // Anchored points keep whatever the anchor constraint wrote.
            if !p.is_anchored() {
                p.set_state(s.saved);
            }
        }
    }

    fn prepare(&mut self, point_count: usize) {
        if self.stages.len() < point_count {
            log::debug!("growing RK4 staging from {} to {} slots", self.stages.len(), point_count);
            self.stages.resize_with(point_count, Stages::default);
        }
        for s in self.stages.iter_mut().take(point_count) {
            s.reset();
        }
    }
}
