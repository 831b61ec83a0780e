//! Runtime engine: a particle system bound to a validated configuration
//!
//! The configuration is checked once in [`Simulator::new`]; after that every
//! call to [`Simulator::step`] applies the same scheme unconditionally.

use log::debug;

use super::diagnostics::{compute_energy, Energy, EnergyRecord};
use super::error::SimResult;
use super::integrator;
use super::params::SimulationConfig;
use super::states::ParticleSystem;

#[derive(Debug, Clone)]
pub struct Simulator<const D: usize> {
    system: ParticleSystem<D>,
    config: SimulationConfig,
}

impl<const D: usize> Simulator<D> {
    pub fn new(system: ParticleSystem<D>, config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        debug!(
            "Simulator::new(n={}, dim={}, dt={}, softening={}, boundary={:?}, integrator={:?})",
            system.len(),
            D,
            config.time_step,
            config.softening_length,
            config.boundary,
            config.integrator
        );
        Ok(Self { system, config })
    }

    pub fn step(&mut self) {
        integrator::step(&mut self.system, &self.config);
    }

    /// Advance `n` steps
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    pub fn energy(&self) -> Energy {
        compute_energy(&self.system, &self.config)
    }

    pub fn energy_record(&self) -> EnergyRecord {
        EnergyRecord::capture(&self.system, &self.config)
    }

    pub fn system(&self) -> &ParticleSystem<D> {
        &self.system
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn into_system(self) -> ParticleSystem<D> {
        self.system
    }
}
