//! Benchmarks for ropenet simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use ropenet::*;

fn gravity() -> ForceConfig<Vec3<f32>> {
    ForceConfig::new()
        .with_gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_ground_plane(GroundPlane::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0)))
}

fn rope_simulation(integrator: IntegratorKind) -> Simulation<Vec3<f32>> {
    let config = SimulationConfig::new()
        .with_force(gravity())
        .with_integrator(integrator)
        .with_time_step(1.0 / 240.0);
    let mut sim = Simulation::new(config).unwrap();
    sim.add(
        RopeConfig::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
            .with_point_count(50)
            .with_length(10.0)
            .with_mass(50.0)
            .with_root_anchor(Vec3::new(0.0, 10.0, 0.0)),
    )
    .unwrap();
    sim
}

fn bench_rope_euler(c: &mut Criterion) {
    c.bench_function("rope_50_points_euler_60_steps", |b| {
        b.iter(|| {
            let mut sim = rope_simulation(IntegratorKind::Euler);
            for _ in 0..60 {
                sim.step(&mut NoOpStepObserver);
            }
            sim.kinetic_energy()
        });
    });
}

fn bench_rope_rk4(c: &mut Criterion) {
    c.bench_function("rope_50_points_rk4_60_steps", |b| {
        b.iter(|| {
            let mut sim = rope_simulation(IntegratorKind::Rk4);
            for _ in 0..60 {
                sim.step(&mut NoOpStepObserver);
            }
            sim.kinetic_energy()
        });
    });
}

fn bench_net_simulation(c: &mut Criterion) {
    c.bench_function("net_20x20_leapfrog_60_steps", |b| {
        b.iter(|| {
            let config = SimulationConfig::new()
                .with_force(gravity())
                .with_integrator(IntegratorKind::Leapfrog)
                .with_time_step(1.0 / 240.0);
            let mut sim = Simulation::new(config).unwrap();
            sim.add(
                NetConfig::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0))
                    .with_size(20, 20)
                    .with_spacing(0.25)
                    .with_mass(400.0),
            )
            .unwrap();
            for _ in 0..60 {
                sim.step(&mut NoOpStepObserver);
            }
            sim.kinetic_energy()
        });
    });
}

fn bench_rope_net_rebuild(c: &mut Criterion) {
    c.bench_function("rope_net_10x20_rebuild", |b| {
        let rope = RopeConfig::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
            .with_point_count(20)
            .with_length(4.75);
        let mut sim: Simulation<Vec3<f32>> = Simulation::new(SimulationConfig::new()).unwrap();
        let ids = sim.add_rope_net(rope, 10, Vec3::new(0.0, 0.0, 0.25)).unwrap();
        let config = sim.structure_config(ids[5]).unwrap().clone();
        b.iter(|| sim.rebuild(ids[5], config.clone()).unwrap());
    });
}

criterion_group!(benches, bench_rope_euler, bench_rope_rk4, bench_net_simulation, bench_rope_net_rebuild);
criterion_main!(benches);
