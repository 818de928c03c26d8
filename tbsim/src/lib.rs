pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{reset_body, Body, NVec2, OrbitPath, System, N_BODIES};
pub use simulation::error::{SimError, SimResult};
pub use simulation::forces::{Attraction, NewtonianGravity, PairForce};
pub use simulation::integrator::{advance_tick, update_position};
pub use simulation::stability::{score_stability, StabilityPredictor, StabilityReport};
pub use simulation::scenario::{InitialConditions, Scenario};

pub use configuration::config::{UpdateOrderConfig, EngineConfig, ParametersConfig, RunConfig, GeneratorConfig, BodyConfig, ScenarioConfig};

pub use visualization::{console::run_console, projection::Viewport};

pub use benchmark::benchmark::{bench_tick, bench_energy_drift_curve};
