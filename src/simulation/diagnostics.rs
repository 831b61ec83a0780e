//! Conserved-quantity diagnostics: energy, momentum, centre of mass
//!
//! These are read-only views of a [`ParticleSystem`]; they are what an
//! energy log or a drift check consumes after each step.

use std::fmt;

use super::forces::NewtonianGravity;
use super::params::SimulationConfig;
use super::states::{NVec, ParticleSystem};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energy {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Kinetic energy sum(m v^2 / 2) and softened pair potential energy
pub fn compute_energy<const D: usize>(sys: &ParticleSystem<D>, cfg: &SimulationConfig) -> Energy {
    let kinetic = sys
        .velocities()
        .iter()
        .zip(sys.masses())
        .map(|(v, m)| 0.5 * m * v.norm_squared())
        .sum();
    let potential = NewtonianGravity::from_config(cfg).potential(sys.positions(), sys.masses());
    Energy { kinetic, potential }
}

pub fn total_mass<const D: usize>(sys: &ParticleSystem<D>) -> f64 {
    sys.masses().iter().sum()
}

pub fn total_momentum<const D: usize>(sys: &ParticleSystem<D>) -> NVec<D> {
    sys.velocities()
        .iter()
        .zip(sys.masses())
        .fold(NVec::<D>::zeros(), |p, (v, m)| p + *m * *v)
}

pub fn center_of_mass<const D: usize>(sys: &ParticleSystem<D>) -> NVec<D> {
    let weighted = sys
        .positions()
        .iter()
        .zip(sys.masses())
        .fold(NVec::<D>::zeros(), |c, (x, m)| c + *m * *x);
    weighted / total_mass(sys)
}

/// |E - E0| / |E0|, or the absolute change when E0 is zero
pub fn relative_drift(initial: f64, current: f64) -> f64 {
    let diff = (current - initial).abs();
    if initial == 0.0 {
        diff
    } else {
        diff / initial.abs()
    }
}

/// One line of an energy log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRecord {
    pub step: u64,
    pub time: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl EnergyRecord {
    pub fn capture<const D: usize>(sys: &ParticleSystem<D>, cfg: &SimulationConfig) -> Self {
        let e = compute_energy(sys, cfg);
        Self {
            step: sys.steps(),
            time: sys.time(),
            kinetic: e.kinetic,
            potential: e.potential,
            total: e.total(),
        }
    }
}

/// Whitespace separated: `step time kinetic potential total`
impl fmt::Display for EnergyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.10e} {:.10e} {:.10e}",
            self.step, self.time, self.kinetic, self.potential, self.total
        )
    }
}
