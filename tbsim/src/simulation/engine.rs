//! High-level runtime engine settings
//!
//! Selects the per-tick update order, how coincident bodies are handled and
//! how much trail history each body keeps

use crate::configuration::config::UpdateOrderConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub update_order: UpdateOrderConfig, // snapshot or sequential
    pub min_distance: Option<f64>, // None = coincident bodies are an error, Some(eps) = clamp
    pub path_capacity: Option<usize>, // None = unbounded trail
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            update_order: UpdateOrderConfig::Snapshot,
            min_distance: None,
            path_capacity: Some(5000),
        }
    }
}
