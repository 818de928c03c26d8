use log::{info, warn};

use crate::configuration::config::RunConfig;
use crate::simulation::params::DAY;
use crate::simulation::scenario::Scenario;
use crate::simulation::stability::StabilityReport;
use crate::visualization::projection::Viewport;

/// What a console run did, for the caller to print or check
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64, // ticks completed
    pub restarts: u64,
    pub last_report: StabilityReport, // verdict of the current configuration
    pub halted: bool, // a tick fault stopped the run early
}

/// Headless stand-in for the render loop: one tick per frame, periodic
/// restarts, the stability line logged whenever the configuration changes
pub fn run_console(scenario: &mut Scenario, run: &RunConfig) -> RunSummary {
    let viewport = Viewport {
        scale: scenario.parameters.scale,
        au: scenario.parameters.au,
        ..Default::default()
    };

    let mut report = scenario.predict();
    info!("{}", report);

    let mut restarts = 0;
    let mut ticks = 0;
    let mut halted = false;

    for frame in 1..=run.ticks {
        if let Err(e) = scenario.tick() {
            warn!("frame {}: {}", frame, e);
            halted = true;
            break;
        }
        ticks += 1;

        if run.report_every > 0 && frame % run.report_every == 0 {
            log_positions(scenario, &viewport, frame);
        }

        if let Some(every) = run.restart_every {
            if every > 0 && frame % every == 0 && frame < run.ticks {
                match scenario.restart() {
                    Ok(r) => report = r,
                    Err(e) => {
                        warn!("frame {}: restart failed: {}", frame, e);
                        halted = true;
                        break;
                    }
                }
                restarts += 1;
                info!("restart {}: {}", restarts, report);
            }
        }
    }

    RunSummary {
        ticks,
        restarts,
        last_report: report,
        halted,
    }
}

fn log_positions(scenario: &Scenario, viewport: &Viewport, frame: u64) {
    let au = scenario.parameters.au;
    let days = scenario.system.t / DAY;
    for (i, b) in scenario.system.bodies.iter().enumerate() {
        let screen = viewport.world_to_screen(&b.x);
        info!(
            "frame {:6} day {:8.1} body {}: ({:+.3}, {:+.3}) AU |v| {:9.1} m/s, to anchor {:.3} AU, screen ({:.0}, {:.0}){}",
            frame,
            days,
            i,
            b.x.x / au,
            b.x.y / au,
            b.speed(),
            b.distance_to_anchor / au,
            screen.0,
            screen.1,
            if viewport.contains(screen) { "" } else { " off-screen" },
        );
    }
}
