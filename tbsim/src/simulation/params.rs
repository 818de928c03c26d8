//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is immutable once built and is passed explicitly to the
//! integrator, the force law and the scorer:
//! - gravitational constant and fixed step size (`g`, `dt`),
//! - the astronomical unit and render scale used by the projection,
//! - stability threshold and random seed

pub const G: f64 = 6.67428e-11; // m^3 kg^-1 s^-2
pub const AU: f64 = 149.6e6 * 1000.0; // m
pub const DAY: f64 = 3600.0 * 24.0; // s
pub const SCALE_PER_AU: f64 = 50.0; // render units per AU
pub const STABILITY_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size, one tick
    pub au: f64, // astronomical unit
    pub scale: f64, // render units per AU
    pub stability_threshold: f64, // inclusive score needed for a stable verdict
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: G,
            dt: DAY,
            au: AU,
            scale: SCALE_PER_AU,
            stability_threshold: STABILITY_THRESHOLD,
            seed: 42,
        }
    }
}
