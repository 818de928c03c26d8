use std::time::Instant;

use crate::configuration::config::UpdateOrderConfig;
use crate::simulation::engine::Engine;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::advance_tick;
use crate::simulation::params::{Parameters, AU};
use crate::simulation::stability::{mechanical_energy, StabilityPredictor};
use crate::simulation::states::{Body, NVec2, System};

/// Sun with two light planets on near-circular orbits, deterministic
pub fn sun_and_planets(path_capacity: Option<usize>) -> System {
    let sun = Body::new(NVec2::zeros(), NVec2::zeros(), 1.98892e30, path_capacity);
    let earth = Body::new(NVec2::new(-AU, 0.0), NVec2::new(0.0, 29.783e3), 5.9742e24, path_capacity);
    let mars = Body::new(NVec2::new(-1.524 * AU, 0.0), NVec2::new(0.0, 24.077e3), 6.39e23, path_capacity);
    System::new([sun, earth, mars])
}

/// Time `advance_tick` in both update orders
pub fn bench_tick() {
    let params = Parameters::default();
    let forces = NewtonianGravity {
        g: params.g,
        min_distance: None,
    };
    let steps = [1_000, 10_000, 100_000];

    for order in [UpdateOrderConfig::Snapshot, UpdateOrderConfig::Sequential] {
        let engine = Engine {
            update_order: order,
            ..Default::default()
        };

        for n in steps {
            let mut sys = sun_and_planets(engine.path_capacity);

            // Warm up
            let _ = advance_tick(&mut sys, &engine, &forces, &params);

            let t0 = Instant::now();
            for _ in 0..n {
                if advance_tick(&mut sys, &engine, &forces, &params).is_err() {
                    break;
                }
            }
            let per_tick = t0.elapsed().as_secs_f64() / n as f64;

            println!("{:?}: ticks = {:7}, per tick = {:10.3} us", order, n, per_tick * 1e6);
        }
    }
}

/// Relative mechanical-energy drift over ten simulated years, one line per
/// 30 days. Paste output directly into a spreadsheet to graph
pub fn bench_energy_drift_curve() {
    let params = Parameters::default();
    let engine = Engine::default();
    let forces = NewtonianGravity {
        g: params.g,
        min_distance: None,
    };
    let predictor = StabilityPredictor::new(&params);

    let mut sys = sun_and_planets(engine.path_capacity);
    let e0 = mechanical_energy(&sys, params.g);

    println!("# {}", predictor.predict(&sys));
    println!("day,energy_j,relative_drift");
    for day in 0..=3650u32 {
        if day % 30 == 0 {
            let e = mechanical_energy(&sys, params.g);
            println!("{},{:.6e},{:.6e}", day, e, (e - e0) / e0.abs());
        }
        if advance_tick(&mut sys, &engine, &forces, &params).is_err() {
            break;
        }
    }
}
