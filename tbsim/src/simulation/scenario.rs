//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with three bodies at t = 0)
//! - the force law (`NewtonianGravity`)
//! - the stability predictor and the seeded generator used on restart
//!
//! The driver owns a `Scenario`, calls [`Scenario::tick`] once per frame and
//! [`Scenario::restart`] whenever new initial conditions are wanted.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::configuration::config::{BodyConfig, GeneratorConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimResult;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::advance_tick;
use crate::simulation::params::Parameters;
use crate::simulation::stability::{StabilityPredictor, StabilityReport};
use crate::simulation::states::{reset_body, Body, NVec2, System, N_BODIES};

/// Initial state of one body as produced by the generator.
/// x-velocity always starts at zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub x: f64,
    pub y: f64,
    pub vel_y: f64,
    pub mass: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions(pub [InitialCondition; N_BODIES]);

impl InitialConditions {
    /// Sample positions in +-range AU, y-velocity in +-range m/s and masses
    /// from the anchor range for body 0 and the satellite range for the rest.
    /// Fails without drawing anything if a range cannot be sampled
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, cfg: &GeneratorConfig, au: f64) -> SimResult<Self> {
        cfg.validate()?;
        let p = cfg.position_range_au;
        let v = cfg.velocity_range;

        let conditions = std::array::from_fn(|i| {
            let [m_lo, m_hi] = if i == 0 { cfg.anchor_mass } else { cfg.satellite_mass };
            InitialCondition {
                x: rng.random_range(-p..=p) * au,
                y: rng.random_range(-p..=p) * au,
                vel_y: rng.random_range(-v..=v),
                mass: rng.random_range(m_lo..=m_hi),
            }
        });
        Ok(InitialConditions(conditions))
    }
}

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: NewtonianGravity,
    pub predictor: StabilityPredictor,
    generator: GeneratorConfig,
    rng: ChaChaRng,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            dt: p_cfg.dt,
            au: p_cfg.au,
            scale: p_cfg.scale,
            stability_threshold: p_cfg.stability_threshold,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            update_order: e_cfg.update_order,
            min_distance: e_cfg.min_distance,
            path_capacity: e_cfg.path_capacity,
        };

        let mut rng = ChaChaRng::seed_from_u64(parameters.seed);

        // Bodies: explicit ones from the file, otherwise sampled
        let bodies: [Body; N_BODIES] = match &cfg.bodies {
            Some(list) => std::array::from_fn(|i| {
                let bc: &BodyConfig = &list[i];
                Body::new(NVec2::from(bc.x), NVec2::from(bc.v), bc.m, engine.path_capacity)
            }),
            None => {
                let InitialConditions(ics) = InitialConditions::generate(&mut rng, &cfg.generator, parameters.au)?;
                ics.map(|ic| Body::new(NVec2::new(ic.x, ic.y), NVec2::new(0.0, ic.vel_y), ic.mass, engine.path_capacity))
            }
        };
        let system = System::new(bodies);

        let forces = NewtonianGravity {
            g: parameters.g,
            min_distance: engine.min_distance,
        };
        let predictor = StabilityPredictor::new(&parameters);

        debug!("built scenario: order {:?}, seed {}", engine.update_order, parameters.seed);

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            predictor,
            generator: cfg.generator,
            rng,
        })
    }

    /// Advance every body by one time step
    pub fn tick(&mut self) -> SimResult<()> {
        advance_tick(&mut self.system, &self.engine, &self.forces, &self.parameters)
    }

    /// Score the current state
    pub fn predict(&self) -> StabilityReport {
        self.predictor.predict(&self.system)
    }

    /// Apply the given initial conditions to all three bodies, rewind time
    /// and score the new configuration
    pub fn reset_with(&mut self, ics: &InitialConditions) -> StabilityReport {
        for (body, ic) in self.system.bodies.iter_mut().zip(ics.0.iter()) {
            reset_body(body, ic.x, ic.y, ic.vel_y, ic.mass);
        }
        self.system.t = 0.0;
        self.predict()
    }

    /// Draw fresh random initial conditions and reset to them
    pub fn restart(&mut self) -> SimResult<StabilityReport> {
        let ics = InitialConditions::generate(&mut self.rng, &self.generator, self.parameters.au)?;
        debug!("restart: {:?}", ics);
        Ok(self.reset_with(&ics))
    }
}
