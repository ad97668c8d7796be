//! The force model: accumulates every force acting on a set of points.
//!
//! [`apply_forces`] runs the full pipeline in a fixed order:
//!
//! 1. clear and gravity
//! 2. ground contact
//! 3. air friction
//! 4. structural spring-dampers
//! 5. forwarded collision forces
//! 6. anchor constraint
//!
//! Each stage is also exposed on its own. The anchor stage must stay last so
//! kinematic points always end an evaluation exactly on their targets.

use crate::config::{ForceConfig, GroundPlane};
use crate::float::Float;
use crate::link::{Link, LinkGraph};
use crate::point::Point;
use crate::vec::Vec;

/// Run the whole force pipeline on `points`.
pub fn apply_forces<V: Vec>(
    points: &mut [Point<V>],
    links: &LinkGraph<V::Scalar>,
    config: &ForceConfig<V>,
) {
    debug_assert!(
        links.point_count() <= points.len(),
        "link graph spans {} points but only {} exist",
        links.point_count(),
        points.len(),
    );

    clear_and_apply_gravity(points, config.gravity);
    apply_ground_forces(points, &config.ground_planes, config.ground_stiffness, config.ground_damping);
    apply_air_friction(points, config.air_friction);
    apply_spring_forces(points, links);
    apply_collision_forces(points);
    constrain_anchor_points(points);
}

/// Reset every force accumulator, then add `gravity * mass` to free points.
pub fn clear_and_apply_gravity<V: Vec>(points: &mut [Point<V>], gravity: V) {
    for p in points.iter_mut() {
        p.clear_force();
        let weight = gravity.scale(p.mass());
        p.apply_force(weight);
    }
}

/// Penalty contact against every plane: an outward spring on the penetration
/// depth plus velocity damping. Planes contribute independently.
pub fn apply_ground_forces<V: Vec>(
    points: &mut [Point<V>],
    planes: &[GroundPlane<V>],
    stiffness: V::Scalar,
    damping: V::Scalar,
) {
    for plane in planes {
        for p in points.iter_mut() {
            let dist = plane.signed_distance(p.position);
            if dist < p.radius {
                let penetration = p.radius - dist;
                p.apply_force(plane.normal.scale(stiffness * penetration));
                p.apply_force(p.velocity.scale(-damping));
            }
        }
    }
}

/// Linear drag.
pub fn apply_air_friction<V: Vec>(points: &mut [Point<V>], coefficient: V::Scalar) {
    for p in points.iter_mut() {
        p.apply_force(p.velocity.scale(-coefficient));
    }
}

/// Force exerted on `p1` by the spring-damper `link` towards `p2`.
/// The force on `p2` is the exact negation.
///
/// Damping uses the full relative velocity, `c * |v2 - v1| * normalize(v2 - v1)`,
/// not its projection onto the link axis. Coincident endpoints give no spring
/// term.
pub fn spring_damper_force<V: Vec>(p1: &Point<V>, p2: &Point<V>, link: &Link<V::Scalar>) -> V {
    let delta = p2.position - p1.position;
    let dist = delta.length();
    let spring = if dist.is_near_zero(V::Scalar::from_f32(1e-10)) {
        V::zero()
    } else {
        let stretch = dist - link.rest_length;
        delta.scale(link.stiffness * stretch / dist)
    };

    let relative_velocity = p2.velocity - p1.velocity;
    let damping = relative_velocity
        .normalize()
        .scale(link.damping * relative_velocity.length());

    spring + damping
}

/// Apply every link exactly once: `+F` on the lower index, `-F` on the higher.
pub fn apply_spring_forces<V: Vec>(points: &mut [Point<V>], links: &LinkGraph<V::Scalar>) {
    for link in links.iter() {
        let force = spring_damper_force(&points[link.a], &points[link.b], link);
        points[link.a].apply_force(force);
        points[link.b].apply_force(-force);
    }
}

/// Consume queued collision forces. Each queued force is applied at most once.
pub fn apply_collision_forces<V: Vec>(points: &mut [Point<V>]) {
    for p in points.iter_mut() {
        p.apply_collision_force();
    }
}

/// Snap anchored points onto their targets with zero velocity.
pub fn constrain_anchor_points<V: Vec>(points: &mut [Point<V>]) {
    for p in points.iter_mut() {
        p.constrain_to_anchor();
    }
}

/// Elastic energy stored in a link.
pub fn spring_potential_energy<V: Vec>(points: &[Point<V>], link: &Link<V::Scalar>) -> V::Scalar {
    let stretch = points[link.a].position.distance(points[link.b].position) - link.rest_length;
    V::Scalar::half() * link.stiffness * stretch * stretch
}
