//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – update order, coincident-body policy, trail length
//! - [`ParametersConfig`] – physical constants, step size, threshold, seed
//! - [`RunConfig`]        – how long the driver runs and how often it restarts
//! - [`GeneratorConfig`]  – ranges for random initial conditions
//! - [`BodyConfig`]       – optional explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section is optional and falls back to the defaults below:
//!
//! ```yaml
//! engine:
//!   update_order: "snapshot"  # or "sequential"
//!   min_distance: ~           # null -> coincident bodies halt the tick
//!   path_capacity: 5000       # null -> unbounded trail
//!
//! parameters:
//!   G: 6.67428e-11            # gravitational constant
//!   dt: 86400.0               # one tick, seconds
//!   au: 1.496e11              # astronomical unit, meters
//!   scale: 50.0               # render units per AU
//!   stability_threshold: 0.7
//!   seed: 42
//!
//! run:
//!   ticks: 3650
//!   restart_every: ~          # null -> never restart
//!   report_every: 365
//!
//! generator:
//!   position_range_au: 0.5
//!   velocity_range: 25000.0
//!   anchor_mass: [0.8e30, 1.2e30]
//!   satellite_mass: [0.2e30, 0.4e30]
//!
//! bodies:                     # omit for random initial conditions
//!   - x: [ 0.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0e30
//!   - x: [ 1.0e11, 0.0 ]
//!     v: [ 0.0, 20000.0 ]
//!     m: 0.3e30
//!   - x: [ -1.0e11, 0.0 ]
//!     v: [ 0.0, -20000.0 ]
//!     m: 0.3e30
//! ```
//!
//! The scenario builder maps this configuration into its runtime
//! representation (`Engine`, `Parameters`, `System`).

use serde::Deserialize;

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::params;
use crate::simulation::states::N_BODIES;

/// Order in which bodies are moved within one tick
/// `update_order: "snapshot"` or `update_order: "sequential"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrderConfig {
    #[default]
    #[serde(rename = "snapshot")] // All forces from the pre-tick state, order independent
    Snapshot,

    #[serde(rename = "sequential")] // Body i sees bodies 0..i already moved this tick
    Sequential,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub update_order: UpdateOrderConfig, // how a tick reads neighbour state
    pub min_distance: Option<f64>, // clamp for the force separation, None = error on contact
    pub path_capacity: Option<usize>, // trail points kept per body, None = unbounded
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_order: UpdateOrderConfig::Snapshot,
            min_distance: None,
            path_capacity: Some(5000),
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub dt: f64, // time step size
    pub au: f64, // astronomical unit
    pub scale: f64, // render units per AU
    pub stability_threshold: f64, // inclusive score for a stable verdict
    pub seed: u64, // deterministic seed to make runs reproducable
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: params::G,
            dt: params::DAY,
            au: params::AU,
            scale: params::SCALE_PER_AU,
            stability_threshold: params::STABILITY_THRESHOLD,
            seed: 42,
        }
    }
}

/// How the console driver runs the scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub ticks: u64, // total ticks to run
    pub restart_every: Option<u64>, // regenerate initial conditions every n ticks
    pub report_every: u64, // log body positions every n ticks, 0 = never
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 3650,
            restart_every: None,
            report_every: 365,
        }
    }
}

/// Sampling ranges for random initial conditions
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub position_range_au: f64, // x and y uniform in +-range AU
    pub velocity_range: f64, // y-velocity uniform in +-range m/s
    pub anchor_mass: [f64; 2], // body 0 mass range, kg
    pub satellite_mass: [f64; 2], // bodies 1 and 2 mass range, kg
}

impl GeneratorConfig {
    /// Ranges must be sampleable: non-negative spreads, ordered positive masses
    pub fn validate(&self) -> SimResult<()> {
        check(self.position_range_au >= 0.0 && self.position_range_au.is_finite(), "position_range_au must be non-negative")?;
        check(self.velocity_range >= 0.0 && self.velocity_range.is_finite(), "velocity_range must be non-negative")?;
        for (name, [lo, hi]) in [("anchor_mass", self.anchor_mass), ("satellite_mass", self.satellite_mass)] {
            if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
                return Err(SimError::InvalidConfig(format!("{} must be an ordered positive range", name)));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            position_range_au: 0.5,
            velocity_range: 25.0 * 1000.0,
            anchor_mass: [0.8e30, 1.2e30],
            satellite_mass: [0.2e30, 0.4e30],
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position, meters
    pub v: [f64; 2], // Initial velocity, meters per second
    pub m: f64,      // Mass, kilograms
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub run: RunConfig,
    pub generator: GeneratorConfig,
    pub bodies: Option<Vec<BodyConfig>>, // explicit initial state, None = random
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.parameters;
        check(p.g > 0.0 && p.g.is_finite(), "G must be positive")?;
        check(p.dt > 0.0 && p.dt.is_finite(), "dt must be positive")?;
        check(p.au > 0.0 && p.au.is_finite(), "au must be positive")?;
        check(p.scale > 0.0 && p.scale.is_finite(), "scale must be positive")?;
        check((0.0..=1.0).contains(&p.stability_threshold), "stability_threshold must be within [0, 1]")?;

        let e = &self.engine;
        if let Some(eps) = e.min_distance {
            check(eps > 0.0 && eps.is_finite(), "min_distance must be positive")?;
        }
        check(e.path_capacity != Some(0), "path_capacity must be positive")?;

        self.generator.validate()?;

        if let Some(bodies) = &self.bodies {
            if bodies.len() != N_BODIES {
                return Err(SimError::InvalidConfig(format!("expected {} bodies, got {}", N_BODIES, bodies.len())));
            }
            for (i, b) in bodies.iter().enumerate() {
                if !(b.m > 0.0 && b.m.is_finite()) {
                    return Err(SimError::InvalidConfig(format!("body {} mass must be positive", i)));
                }
                if !b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()) {
                    return Err(SimError::InvalidConfig(format!("body {} has a non-finite coordinate", i)));
                }
            }
        }
        Ok(())
    }
}

fn check(ok: bool, msg: &str) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(msg.to_string()))
    }
}
