use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ropenet::{
    CollisionEvent, ForceConfig, GroundPlane, IntegratorKind, NetConfig, NoOpStepObserver, PointRef, PointState,
    RopeConfig, Simulation, SimulationConfig, Vec3,
};
use test_case::test_case;

type V3 = Vec3<f64>;

fn run(integrator: IntegratorKind, seed: u64) -> Vec<PointState<V3>> {
    let force = ForceConfig::new()
        .with_gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_ground_plane(GroundPlane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)));
    let config = SimulationConfig::new()
        .with_force(force)
        .with_integrator(integrator)
        .with_time_step(1.0 / 240.0);
    let mut sim = Simulation::new(config).unwrap();

    let rope = sim
        .add(
            RopeConfig::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
                .with_point_count(12)
                .with_mass(12.0)
                .with_root_anchor(Vec3::new(0.0, 2.0, 0.0)),
        )
        .unwrap();
    sim.add(
        NetConfig::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0))
            .with_size(6, 6)
            .with_spacing(0.4)
            .with_mass(36.0),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..120 {
        let index = rng.gen_range(0..12);
        let velocity = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        sim.queue_collision(CollisionEvent {
            point: PointRef::new(rope, index),
            relative_velocity: velocity,
            other_mass: 0.5,
        })
        .unwrap();
        sim.tick(1.0 / 240.0, &mut NoOpStepObserver);
    }

    sim.points().iter().map(|p| p.state()).collect()
}

#[test_case(IntegratorKind::Euler ; "euler")]
#[test_case(IntegratorKind::Leapfrog ; "leapfrog")]
#[test_case(IntegratorKind::Rk4 ; "rk4")]
fn simulation_deterministic(integrator: IntegratorKind) {
    let results: Vec<_> = (0..3).map(|_| run(integrator, 42)).collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
            assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
            assert_eq!(a.position.z.to_bits(), b.position.z.to_bits());
            assert_eq!(a.velocity, b.velocity);
        }
    }
}

#[test]
fn different_inputs_diverge() {
    assert_ne!(run(IntegratorKind::Rk4, 1), run(IntegratorKind::Rk4, 2));
}
