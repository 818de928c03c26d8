//! Fixed-step time integrator for the three-body system
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked with the force at
//! the current positions, then the position drifts with the new velocity.
//! One call of [`advance_tick`] moves every body by `params.dt`.

use log::warn;

use super::engine::Engine;
use super::error::{SimError, SimResult};
use super::forces::{net_force, NetForce, PairForce};
use super::params::Parameters;
use super::states::{NVec2, System, N_BODIES};
use crate::configuration::config::UpdateOrderConfig;

/// Kick and drift body `i` with a precomputed net force, without storing
/// the result. Returns the new (velocity, position)
fn kick_drift(sys: &System, i: usize, net: &NetForce, dt: f64) -> SimResult<(NVec2, NVec2)> {
    let b = &sys.bodies[i];

    // v_n+1 = v_n + F/m dt, then x_n+1 = x_n + v_n+1 dt
    let v = b.v + net.force / b.m * dt;
    let x = b.x + v * dt;
    if !v.iter().chain(x.iter()).all(|c| c.is_finite()) {
        return Err(SimError::NonFiniteState { index: i });
    }
    Ok((v, x))
}

/// Store a computed step on body `i` and extend its trail
fn commit(sys: &mut System, i: usize, net: &NetForce, (v, x): (NVec2, NVec2)) {
    let b = &mut sys.bodies[i];
    b.v = v;
    b.x = x;
    b.path.push(x);
    if let Some(d) = net.anchor_distance {
        b.distance_to_anchor = d;
    }
}

/// Advance body `i` by one step using the current state of the others.
/// Other bodies are read as they are now, whether or not they were already
/// moved in this tick
pub fn update_position<F: PairForce + ?Sized>(sys: &mut System, i: usize, law: &F, params: &Parameters) -> SimResult<()> {
    let net = net_force(&*sys, i, law)?;
    let step = kick_drift(&*sys, i, &net, params.dt)?;
    commit(sys, i, &net, step);
    Ok(())
}

/// Advance the whole system by one tick in the order chosen by `engine`.
///
/// Snapshot order computes all three forces before moving anything, so a
/// fault leaves the system untouched. Sequential order moves bodies one at a
/// time; on a fault, bodies already moved keep their new state.
/// `sys.t` only advances when every body was updated.
pub fn advance_tick<F: PairForce + ?Sized>(sys: &mut System, engine: &Engine, law: &F, params: &Parameters) -> SimResult<()> {
    let result = match engine.update_order {
        UpdateOrderConfig::Snapshot => snapshot_tick(sys, law, params),
        UpdateOrderConfig::Sequential => {
            (0..N_BODIES).try_for_each(|i| update_position(sys, i, law, params))
        }
    };

    match result {
        Ok(()) => {
            sys.t += params.dt;
            Ok(())
        }
        Err(e) => {
            warn!("tick halted at t = {:.0} s: {}", sys.t, e);
            Err(e)
        }
    }
}

fn snapshot_tick<F: PairForce + ?Sized>(sys: &mut System, law: &F, params: &Parameters) -> SimResult<()> {
    // Forces and steps from the frozen pre-tick positions
    let mut nets = [NetForce { force: NVec2::zeros(), anchor_distance: None }; N_BODIES];
    let mut steps = [(NVec2::zeros(), NVec2::zeros()); N_BODIES];
    for i in 0..N_BODIES {
        nets[i] = net_force(&*sys, i, law)?;
        steps[i] = kick_drift(&*sys, i, &nets[i], params.dt)?;
    }

    for (i, (net, step)) in nets.iter().zip(steps).enumerate() {
        commit(sys, i, net, step);
    }
    Ok(())
}
