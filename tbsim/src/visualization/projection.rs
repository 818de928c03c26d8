//! World-space → screen-space mapping for a 2D renderer
//!
//! Positions are scaled by `scale / au` and centered on the viewport, so
//! 1 AU covers `scale` screen units. Nothing here draws; a renderer takes the
//! points and does the pixels.

use crate::simulation::params::{AU, SCALE_PER_AU};
use crate::simulation::states::{Body, NVec2};

/// Fewest trail points a renderer needs to draw a polyline
pub const MIN_TRAIL_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64, // screen units per AU
    pub au: f64, // meters per AU
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            scale: SCALE_PER_AU,
            au: AU,
        }
    }
}

impl Viewport {
    pub fn world_to_screen(&self, pos: &NVec2) -> (f64, f64) {
        let k = self.scale / self.au;
        (pos.x * k + self.width / 2.0, pos.y * k + self.height / 2.0)
    }

    /// Screen points of the body's trail, oldest first.
    /// Empty while the trail is too short to draw
    pub fn trail(&self, body: &Body) -> Vec<(f64, f64)> {
        if body.path.len() < MIN_TRAIL_POINTS {
            return Vec::new();
        }
        body.path.iter().map(|p| self.world_to_screen(p)).collect()
    }

    pub fn contains(&self, (sx, sy): (f64, f64)) -> bool {
        (0.0..=self.width).contains(&sx) && (0.0..=self.height).contains(&sy)
    }
}
