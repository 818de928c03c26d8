//! Force contributors for the three-body engine
//!
//! Defines the pairwise force trait and direct Newtonian gravity, plus the
//! per-body summation over every other body in the system

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::states::{Body, NVec2, System};

/// Force exerted on one body by another, with the separation it was computed at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub force: NVec2, // newtons, acting on the first body
    pub distance: f64, // meters
}

/// Trait for pairwise force laws.
/// Implementations return the force `other` exerts on `body` and must not
/// mutate either body
pub trait PairForce {
    fn attraction(&self, body: &Body, other: &Body) -> SimResult<Attraction>;
}

/// 2D Newtonian gravity.
/// `min_distance` clamps the separation used for the force magnitude; without
/// it, coincident bodies are reported as an error
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub min_distance: Option<f64>, // clamp floor, None = fail on zero distance
}

impl PairForce for NewtonianGravity {
    fn attraction(&self, body: &Body, other: &Body) -> SimResult<Attraction> {
        // displacement from body to other
        let d = other.x - body.x;
        let distance = d.norm();

        let r = match self.min_distance {
            Some(eps) => distance.max(eps),
            None if distance == 0.0 => {
                // indices are filled in by the caller
                return Err(SimError::DegenerateConfiguration { a: 0, b: 0 });
            }
            None => distance,
        };

        // Clamped but coincident: no direction to pull in
        if distance == 0.0 {
            return Ok(Attraction { force: NVec2::zeros(), distance });
        }

        // |F| = G m1 m2 / r^2, resolved along the displacement angle
        let magnitude = self.g * body.m * other.m / (r * r);
        let theta = d.y.atan2(d.x);
        let force = NVec2::new(theta.cos() * magnitude, theta.sin() * magnitude);

        Ok(Attraction { force, distance })
    }
}

/// Net force on body `i` and, if an anchor was among the sources, the
/// distance to it
#[derive(Debug, Clone, Copy)]
pub struct NetForce {
    pub force: NVec2,
    pub anchor_distance: Option<f64>,
}

/// Sum the attraction of every other body in `sys` on body `i`
pub fn net_force<F: PairForce + ?Sized>(sys: &System, i: usize, law: &F) -> SimResult<NetForce> {
    let body = sys
        .bodies
        .get(i)
        .ok_or_else(|| SimError::InvalidConfig(format!("body index {} out of range", i)))?;
    let mut force = NVec2::zeros();
    let mut anchor_distance = None;

    for (j, other) in sys.bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        let a = law.attraction(body, other).map_err(|e| match e {
            SimError::DegenerateConfiguration { .. } => SimError::DegenerateConfiguration { a: i, b: j },
            other => other,
        })?;
        if other.anchor {
            anchor_distance = Some(a.distance);
        }
        force += a.force;
    }

    Ok(NetForce { force, anchor_distance })
}
