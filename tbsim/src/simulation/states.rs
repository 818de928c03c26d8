//! Core state types for the three-body simulation.
//!
//! - `Body`      one point mass with its trail (`OrbitPath`)
//! - `System`    exactly three bodies plus the current simulation time `t`
//!
//! All quantities are SI: meters, meters/second, kilograms, seconds.

use std::collections::vec_deque;
use std::collections::VecDeque;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Number of bodies in every system
pub const N_BODIES: usize = 3;

/// Position history of one body, oldest point first.
///
/// With a capacity set, the oldest point is dropped once the buffer is full.
/// Without one the history grows for the lifetime of the body.
#[derive(Debug, Clone, Default)]
pub struct OrbitPath {
    points: VecDeque<NVec2>,
    capacity: Option<usize>,
}

impl OrbitPath {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.unwrap_or(0)),
            capacity,
        }
    }

    pub fn push(&mut self, point: NVec2) {
        if let Some(cap) = self.capacity {
            while self.points.len() >= cap {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn first(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.back()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, NVec2> {
        self.points.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub anchor: bool, // other bodies record their distance to this one
    pub path: OrbitPath, // trail of past positions
    pub distance_to_anchor: f64, // last distance measured to the anchor body
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, path_capacity: Option<usize>) -> Self {
        Self {
            x,
            v,
            m,
            anchor: false,
            path: OrbitPath::new(path_capacity),
            distance_to_anchor: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    /// Distance from the coordinate origin
    pub fn radius(&self) -> f64 {
        self.x.norm()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

/// Reinitialise one body for a restart.
///
/// Position, mass and y-velocity take the supplied values, x-velocity is
/// zeroed, and the trail and anchor distance are cleared. The anchor flag is
/// kept.
pub fn reset_body(body: &mut Body, x: f64, y: f64, vel_y: f64, mass: f64) {
    body.x = NVec2::new(x, y);
    body.v = NVec2::new(0.0, vel_y);
    body.m = mass;
    body.path.clear();
    body.distance_to_anchor = 0.0;
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: [Body; N_BODIES], // body 0 is the anchor and ratio reference
    pub t: f64, // time
}

impl System {
    /// Build a system and mark body 0 as the anchor
    pub fn new(mut bodies: [Body; N_BODIES]) -> Self {
        for (i, b) in bodies.iter_mut().enumerate() {
            b.anchor = i == 0;
        }
        Self { bodies, t: 0.0 }
    }
}
