//! Fixed-step time integrators for the N-body system
//!
//! [`step`] advances a [`ParticleSystem`] by one `time_step` using the scheme
//! selected in [`SimulationConfig::integrator`]. The same scheme must be used
//! for every step of a run; nothing here switches schemes on its own.
//!
//! With a periodic boundary, positions are wrapped after every drift.

use super::boundary::wrap_all;
use super::forces::NewtonianGravity;
use super::params::{Integrator, SimulationConfig};
use super::states::{NVec, ParticleSystem};

/// Advance the system by one step, in place.
///
/// The configuration is not validated here; see [`crate::Simulator::new`].
pub fn step<const D: usize>(sys: &mut ParticleSystem<D>, cfg: &SimulationConfig) {
    match cfg.integrator {
        Integrator::Leapfrog => leapfrog(sys, cfg),
        Integrator::PositionVerlet => position_verlet(sys, cfg),
        Integrator::SymplecticEuler => symplectic_euler(sys, cfg),
    }
    sys.advance_clock(cfg.time_step);
}

/// Kick-drift-kick:
/// v_n+1/2 = v_n + dt/2 a(x_n), x_n+1 = x_n + dt v_n+1/2,
/// v_n+1 = v_n+1/2 + dt/2 a(x_n+1)
fn leapfrog<const D: usize>(sys: &mut ParticleSystem<D>, cfg: &SimulationConfig) {
    let gravity = NewtonianGravity::from_config(cfg);
    let dt = cfg.time_step;
    let half_dt = 0.5 * dt;
    let p = sys.parts_mut();

    // a_n from x_n
    gravity.accelerations(p.positions, p.masses, p.accel);

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    kick(p.velocities, p.accel, half_dt);

    // Drift: x_n+1 = x_n + dt v_n+1/2, wrapped if periodic
    drift(p.positions, p.velocities, dt, cfg.wrap_length());

    // a_n+1 from x_n+1
    gravity.accelerations(p.positions, p.masses, p.accel);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    kick(p.velocities, p.accel, half_dt);
}

/// Drift-kick-drift:
/// x_half = x_n + dt/2 v_n, v_n+1 = v_n + dt a(x_half),
/// x_n+1 = x_half + dt/2 v_n+1
fn position_verlet<const D: usize>(sys: &mut ParticleSystem<D>, cfg: &SimulationConfig) {
    let gravity = NewtonianGravity::from_config(cfg);
    let dt = cfg.time_step;
    let half_dt = 0.5 * dt;
    let p = sys.parts_mut();

    // Drift: x_half = x_n + (dt/2) v_n
    drift(p.positions, p.velocities, half_dt, cfg.wrap_length());

    // Kick with a_mid from x_half: v_n+1 = v_n + dt a_mid
    gravity.accelerations(p.positions, p.masses, p.accel);
    kick(p.velocities, p.accel, dt);

    // Second drift: x_n+1 = x_half + (dt/2) v_n+1
    drift(p.positions, p.velocities, half_dt, cfg.wrap_length());
}

/// v_n+1 = v_n + dt a(x_n), x_n+1 = x_n + dt v_n+1
fn symplectic_euler<const D: usize>(sys: &mut ParticleSystem<D>, cfg: &SimulationConfig) {
    let gravity = NewtonianGravity::from_config(cfg);
    let dt = cfg.time_step;
    let p = sys.parts_mut();

    // Kick with the old positions, then drift with the new velocities
    gravity.accelerations(p.positions, p.masses, p.accel);
    kick(p.velocities, p.accel, dt);
    drift(p.positions, p.velocities, dt, cfg.wrap_length());
}

/// v += dt a, body by body
fn kick<const D: usize>(v: &mut [NVec<D>], a: &[NVec<D>], dt: f64) {
    for (v, a) in v.iter_mut().zip(a.iter()) {
        *v += dt * *a;
    }
}

/// x += dt v, then map back into [0, l) when the boundary is periodic
fn drift<const D: usize>(x: &mut [NVec<D>], v: &[NVec<D>], dt: f64, wrap_length: Option<f64>) {
    for (x, v) in x.iter_mut().zip(v.iter()) {
        *x += dt * *v;
    }
    // velocities are left alone by the wrap
    if let Some(l) = wrap_length {
        wrap_all(x, l);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{NVec2, System2};

    fn free_particle() -> System2 {
        System2::new(vec![NVec2::new(0.5, 0.5)], vec![NVec2::new(1.0, -2.0)], vec![1.0]).unwrap()
    }

    #[test]
    fn lone_particle_moves_in_a_straight_line() {
        for integrator in [Integrator::Leapfrog, Integrator::PositionVerlet, Integrator::SymplecticEuler] {
            let mut sys = free_particle();
            let cfg = SimulationConfig::new(0.1, 0.0).with_integrator(integrator);
            step(&mut sys, &cfg);
            let x = sys.positions()[0];
            assert!((x - NVec2::new(0.6, 0.3)).norm() < 1e-12, "{integrator:?}: {x:?}");
            assert_eq!(sys.velocities()[0], NVec2::new(1.0, -2.0));
            assert_eq!(sys.steps(), 1);
            assert!((sys.time() - 0.1).abs() < 1e-15);
        }
    }

    #[test]
    fn periodic_wrap_keeps_velocity() {
        let mut sys = free_particle();
        let cfg = SimulationConfig::new(0.5, 0.0).periodic(1.0);
        step(&mut sys, &cfg);
        let x = sys.positions()[0];
        assert!((x - NVec2::new(0.0, 0.5)).norm() < 1e-12, "{x:?}");
        assert_eq!(sys.velocities()[0], NVec2::new(1.0, -2.0));
    }
}
