//! Numerical and physical parameters for the simulation
//!
//! `SimulationConfig` holds runtime settings:
//! - integration step size and scheme,
//! - softening length and gravitational constant,
//! - boundary handling (open or periodic on `[0, domain_size)`)

use serde::Deserialize;

use super::error::{SimError, SimResult};

/// Default gravitational constant in normalized units
pub const DEFAULT_G: f64 = 1.0;

/// What happens to particles leaving the domain
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Unbounded space, particles may escape
    #[default]
    Open,
    /// Positions wrap into `[0, domain_size)` along every axis
    Periodic,
}

/// Fixed-step time integration scheme, chosen once per run
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Kick-drift-kick (velocity Verlet). Symplectic, second order
    #[default]
    Leapfrog,
    /// Drift-kick-drift. Symplectic, second order, one force evaluation
    PositionVerlet,
    /// Kick then drift. Symplectic but first order
    SymplecticEuler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub softening_length: f64,      // minimum effective separation
    pub time_step: f64,             // dt
    pub domain_size: Option<f64>,   // box edge for periodic wrap
    pub boundary: BoundaryMode,
    pub gravitational_constant: f64,
    pub integrator: Integrator,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            softening_length: 0.0,
            time_step: 0.01,
            domain_size: None,
            boundary: BoundaryMode::Open,
            gravitational_constant: DEFAULT_G,
            integrator: Integrator::Leapfrog,
        }
    }
}

impl SimulationConfig {
    pub fn new(time_step: f64, softening_length: f64) -> Self {
        Self {
            time_step,
            softening_length,
            ..Self::default()
        }
    }

    /// Switch to periodic wrapping on a box of edge `domain_size`
    pub fn periodic(mut self, domain_size: f64) -> Self {
        self.boundary = BoundaryMode::Periodic;
        self.domain_size = Some(domain_size);
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Squared softening length, the form used by the force law
    pub fn eps2(&self) -> f64 {
        self.softening_length * self.softening_length
    }

    /// Edge length to wrap on, `None` when the boundary is open
    pub fn wrap_length(&self) -> Option<f64> {
        match self.boundary {
            BoundaryMode::Open => None,
            BoundaryMode::Periodic => self.domain_size,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::invalid(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.softening_length.is_finite() && self.softening_length >= 0.0) {
            return Err(SimError::invalid(format!(
                "softening_length must be non-negative, got {}",
                self.softening_length
            )));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(SimError::invalid("gravitational constant must be finite"));
        }
        if self.boundary == BoundaryMode::Periodic {
            match self.domain_size {
                Some(l) if l.is_finite() && l > 0.0 => {}
                Some(l) => {
                    return Err(SimError::invalid(format!(
                        "periodic boundary needs a positive domain_size, got {l}"
                    )))
                }
                None => return Err(SimError::invalid("periodic boundary needs a domain_size")),
            }
        }
        Ok(())
    }
}
