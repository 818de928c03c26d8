//! Heuristic stability scoring for a three-body snapshot
//!
//! The score is a weighted checklist over aggregate quantities of the system,
//! not a physical stability proof. Body 0 is the reference for every ratio.
//!
//! | criterion                          | weight |
//! |------------------------------------|--------|
//! | total energy < 0                   | 0.30   |
//! | angular momentum proxy > 0         | 0.20   |
//! | mass ratios in [0.1, 0.5]          | 0.20   |
//! | speed ratios in [0.5, 1.5]         | 0.15   |
//! | radius ratios in [0.3, 0.7]        | 0.15   |
//!
//! A configuration is stable when the score reaches the threshold (inclusive).

use std::fmt;

use log::warn;

use super::params::Parameters;
use super::states::{Body, System, N_BODIES};

// Weights in hundredths, summed as integers so 0.70 compares exactly
const W_ENERGY: u32 = 30;
const W_ANGULAR_MOMENTUM: u32 = 20;
const W_MASS: u32 = 20;
const W_VELOCITY: u32 = 15;
const W_POSITION: u32 = 15;

const MASS_RATIO_RANGE: (f64, f64) = (0.1, 0.5);
const VELOCITY_RATIO_RANGE: (f64, f64) = (0.5, 1.5);
const POSITION_RATIO_RANGE: (f64, f64) = (0.3, 0.7);

/// Kinetic energy minus the potential of every ordered pair.
/// Each unordered pair contributes twice; the score is calibrated on this
pub fn total_energy(sys: &System, g: f64) -> f64 {
    let mut kinetic = 0.0;
    let mut potential = 0.0;

    for (i, bi) in sys.bodies.iter().enumerate() {
        kinetic += bi.kinetic_energy();
        for (j, bj) in sys.bodies.iter().enumerate() {
            if i != j {
                let r = (bi.x - bj.x).norm();
                potential -= g * bi.m * bj.m / r;
            }
        }
    }

    kinetic + potential
}

/// Kinetic plus potential energy with each pair counted once.
/// This is the conserved quantity, used for drift diagnostics
pub fn mechanical_energy(sys: &System, g: f64) -> f64 {
    let kinetic: f64 = sys.bodies.iter().map(|b| b.kinetic_energy()).sum();
    let mut potential = 0.0;
    for i in 0..N_BODIES {
        for j in (i + 1)..N_BODIES {
            let (bi, bj) = (&sys.bodies[i], &sys.bodies[j]);
            potential -= g * bi.m * bj.m / (bi.x - bj.x).norm();
        }
    }
    kinetic + potential
}

/// Scalar angular momentum proxy: sum of m |r| |v| about the origin
pub fn angular_momentum(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| b.m * b.radius() * b.speed()).sum()
}

/// Which checklist items a snapshot satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Criteria {
    pub bound_energy: bool,
    pub rotating: bool,
    pub mass_hierarchy: bool,
    pub velocity_balance: bool,
    pub position_balance: bool,
}

impl Criteria {
    /// Score in hundredths
    fn points(&self) -> u32 {
        [
            (self.bound_energy, W_ENERGY),
            (self.rotating, W_ANGULAR_MOMENTUM),
            (self.mass_hierarchy, W_MASS),
            (self.velocity_balance, W_VELOCITY),
            (self.position_balance, W_POSITION),
        ]
        .iter()
        .filter(|(met, _)| *met)
        .map(|(_, w)| w)
        .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    pub energy: f64,
    pub angular_momentum: f64,
    pub mass_ratios: [f64; N_BODIES - 1],
    pub velocity_ratios: [f64; N_BODIES - 1],
    pub position_ratios: [f64; N_BODIES - 1],
    pub criteria: Criteria,
    pub score: f64,
    pub stable: bool,
}

impl fmt::Display for StabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.stable { "Stable" } else { "Unstable" };
        write!(f, "Stability: {} ({:.2})", verdict, self.score)
    }
}

/// Scores snapshots against a fixed threshold
#[derive(Debug, Clone)]
pub struct StabilityPredictor {
    pub g: f64,
    pub threshold: f64,
}

impl StabilityPredictor {
    pub fn new(params: &Parameters) -> Self {
        Self {
            g: params.g,
            threshold: params.stability_threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Score a snapshot. Reads `sys` only.
    ///
    /// A zero mass, speed or radius on body 0 makes the matching ratios
    /// non-finite, which leaves that criterion unmet
    pub fn predict(&self, sys: &System) -> StabilityReport {
        let energy = total_energy(sys, self.g);
        let angular_momentum = angular_momentum(sys);

        let mass_ratios = ratios(sys, "mass", |b| b.m);
        let velocity_ratios = ratios(sys, "speed", |b| b.speed());
        let position_ratios = ratios(sys, "radius", |b| b.radius());

        let criteria = Criteria {
            bound_energy: energy < 0.0,
            rotating: angular_momentum > 0.0,
            mass_hierarchy: all_within(&mass_ratios, MASS_RATIO_RANGE),
            velocity_balance: all_within(&velocity_ratios, VELOCITY_RATIO_RANGE),
            position_balance: all_within(&position_ratios, POSITION_RATIO_RANGE),
        };

        let score = f64::from(criteria.points()) / 100.0;

        StabilityReport {
            energy,
            angular_momentum,
            mass_ratios,
            velocity_ratios,
            position_ratios,
            criteria,
            score,
            stable: score >= self.threshold,
        }
    }
}

/// Verdict and score for `sys` against `threshold`
pub fn score_stability(sys: &System, params: &Parameters, threshold: f64) -> (bool, f64) {
    let report = StabilityPredictor::new(params).with_threshold(threshold).predict(sys);
    (report.stable, report.score)
}

fn ratios<Q: Fn(&Body) -> f64>(sys: &System, name: &str, quantity: Q) -> [f64; N_BODIES - 1] {
    let reference = quantity(&sys.bodies[0]);
    if reference == 0.0 {
        warn!("reference body has zero {}; {} ratios are undefined", name, name);
    }
    [
        quantity(&sys.bodies[1]) / reference,
        quantity(&sys.bodies[2]) / reference,
    ]
}

fn all_within(values: &[f64], (lo, hi): (f64, f64)) -> bool {
    values.iter().all(|r| lo <= *r && *r <= hi)
}
