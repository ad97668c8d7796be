//! Energy behavior of the integrators on an undamped two-point oscillator.
//!
//! Each point has mass 1 and the link stiffness is 800, so the oscillator's
//! angular frequency is 40 rad/s. The accuracy checks run at 1/600 s. At
//! 1/60 s (`omega * dt` of about 0.67) RK4 stays stable but is visibly
//! dissipative.

use ropenet::{
    ForceConfig, IntegratorKind, NoOpStepObserver, RopeConfig, Simulation, SimulationConfig, StructureId, Vec3,
};
use test_case::test_case;

type V3 = Vec3<f64>;

fn oscillator(integrator: IntegratorKind, time_step: f64) -> (Simulation<V3>, StructureId) {
    let config = SimulationConfig::new()
        .with_force(ForceConfig::new().with_air_friction(0.0))
        .with_integrator(integrator)
        .with_time_step(time_step);
    let mut sim = Simulation::new(config).unwrap();
    let id = sim
        .add(
            RopeConfig::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
                .with_point_count(2)
                .with_length(1.0)
                .with_mass(2.0)
                .with_spring(800.0, 0.0),
        )
        .unwrap();
    sim.structure_points_mut(id).unwrap()[1].position = Vec3::new(1.1, 0.0, 0.0);
    (sim, id)
}

/// Largest relative deviation from the initial energy over `steps` steps.
fn max_energy_deviation(integrator: IntegratorKind, time_step: f64, steps: usize) -> f64 {
    let (mut sim, _) = oscillator(integrator, time_step);
    let initial = sim.total_energy();
    let mut worst: f64 = 0.0;
    for _ in 0..steps {
        sim.step(&mut NoOpStepObserver);
        worst = worst.max(((sim.total_energy() - initial) / initial).abs());
    }
    worst
}

#[test]
fn initial_energy_is_elastic() {
    let (sim, _) = oscillator(IntegratorKind::Rk4, 1.0 / 600.0);
    assert!((sim.total_energy() - 4.0).abs() < 1e-9);
}

#[test]
fn rk4_conserves_energy_at_fine_step() {
    let deviation = max_energy_deviation(IntegratorKind::Rk4, 1.0 / 600.0, 1000);
    assert!(deviation < 0.05, "RK4 drifted by {}", deviation);
}

#[test]
fn leapfrog_energy_stays_close() {
    let deviation = max_energy_deviation(IntegratorKind::Leapfrog, 1.0 / 600.0, 1000);
    assert!(deviation < 0.01, "leapfrog drifted by {}", deviation);
}

#[test]
fn rk4_beats_euler_by_an_order_of_magnitude() {
    let rk4 = max_energy_deviation(IntegratorKind::Rk4, 1.0 / 600.0, 1000);
    let euler = max_energy_deviation(IntegratorKind::Euler, 1.0 / 600.0, 1000);
    assert!(euler > 10.0 * rk4, "euler {} vs rk4 {}", euler, rk4);
}

#[test]
fn rk4_at_frame_rate_never_gains_energy() {
    let (mut sim, _) = oscillator(IntegratorKind::Rk4, 1.0 / 60.0);
    let initial = sim.total_energy();
    let mut previous = initial;

    for _ in 0..1000 {
        sim.step(&mut NoOpStepObserver);
        let energy = sim.total_energy();
        assert!(energy.is_finite());
        assert!(energy <= previous * (1.0 + 1e-9), "energy grew from {} to {}", previous, energy);
        previous = energy;
    }
    assert!(previous < initial);
}

#[test_case(IntegratorKind::Euler ; "euler")]
#[test_case(IntegratorKind::Leapfrog ; "leapfrog")]
#[test_case(IntegratorKind::Rk4 ; "rk4")]
fn momentum_is_conserved(integrator: IntegratorKind) {
    let (mut sim, id) = oscillator(integrator, 1.0 / 600.0);
    for _ in 0..500 {
        sim.step(&mut NoOpStepObserver);
    }

    let points = sim.structure_points(id).unwrap();
    let momentum = points[0].velocity.x * points[0].mass() + points[1].velocity.x * points[1].mass();
    assert!(momentum.abs() < 1e-9, "net momentum {}", momentum);
}
