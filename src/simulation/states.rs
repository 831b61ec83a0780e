//! Core state types for the N-body simulation.
//!
//! A [`ParticleSystem`] stores N particles as parallel arrays indexed by
//! particle id `0..N`. The dimension `D` is a const generic, so the same
//! code drives 2D (`NVec2`) and 3D (`NVec3`) runs.
//!
//! The particle count and the masses are fixed at construction. Positions
//! and velocities are only mutated by the integrator.

use nalgebra::{SVector, Vector2, Vector3};

use super::error::{SimError, SimResult};

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Initial state of one particle, used when assembling a system
#[derive(Debug, Clone, PartialEq)]
pub struct Body<const D: usize> {
    pub x: NVec<D>, // position
    pub v: NVec<D>, // velocity
    pub m: f64,     // mass
}

impl<const D: usize> Body<D> {
    pub fn new(x: NVec<D>, v: NVec<D>, m: f64) -> Self {
        Self { x, v, m }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem<const D: usize> {
    positions: Vec<NVec<D>>,
    velocities: Vec<NVec<D>>,
    masses: Vec<f64>,
    t: f64,      // simulated time
    steps: u64,  // completed steps
    // scratch acceleration buffer reused every step
    accel: Vec<NVec<D>>,
}

pub type System2 = ParticleSystem<2>;
pub type System3 = ParticleSystem<3>;

impl<const D: usize> ParticleSystem<D> {
    /// Build a system from parallel arrays.
    ///
    /// Fails with [`SimError::DimensionMismatch`] when the three arrays differ
    /// in length, and with [`SimError::InvalidConfiguration`] when the system
    /// is empty, a mass is not strictly positive, or a position or velocity
    /// component is not finite.
    pub fn new(positions: Vec<NVec<D>>, velocities: Vec<NVec<D>>, masses: Vec<f64>) -> SimResult<Self> {
        let n = positions.len();
        if velocities.len() != n {
            return Err(SimError::DimensionMismatch {
                what: "velocities",
                expected: n,
                found: velocities.len(),
            });
        }
        if masses.len() != n {
            return Err(SimError::DimensionMismatch {
                what: "masses",
                expected: n,
                found: masses.len(),
            });
        }
        if n == 0 {
            return Err(SimError::invalid("a particle system needs at least one particle"));
        }
        if let Some((i, m)) = masses.iter().enumerate().find(|(_, m)| !(m.is_finite() && **m > 0.0)) {
            return Err(SimError::invalid(format!("mass of particle {i} must be positive, got {m}")));
        }
        // kinematics must be finite
        if let Some(i) = positions.iter().position(|x| !x.iter().all(|c| c.is_finite())) {
            return Err(SimError::invalid(format!("position of particle {i} is not finite")));
        }
        if let Some(i) = velocities.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
            return Err(SimError::invalid(format!("velocity of particle {i} is not finite")));
        }

        Ok(Self {
            positions,
            velocities,
            masses,
            t: 0.0,
            steps: 0,
            accel: vec![NVec::<D>::zeros(); n],
        })
    }

    pub fn from_bodies(bodies: Vec<Body<D>>) -> SimResult<Self> {
        let mut positions = Vec::with_capacity(bodies.len());
        let mut velocities = Vec::with_capacity(bodies.len());
        let mut masses = Vec::with_capacity(bodies.len());
        for b in bodies {
            positions.push(b.x);
            velocities.push(b.v);
            masses.push(b.m);
        }
        Self::new(positions, velocities, masses)
    }

    /// Number of particles, fixed for the lifetime of the system
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Always false: construction rejects empty systems
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn positions(&self) -> &[NVec<D>] {
        &self.positions
    }

    pub fn velocities(&self) -> &[NVec<D>] {
        &self.velocities
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Snapshot of particle `i`, or `None` when out of range
    pub fn body(&self, i: usize) -> Option<Body<D>> {
        Some(Body {
            x: *self.positions.get(i)?,
            v: self.velocities[i],
            m: self.masses[i],
        })
    }

    /// Split borrow used by the integrator: mutable kinematics, shared masses,
    /// and the scratch buffer.
    pub(crate) fn parts_mut(&mut self) -> StateParts<'_, D> {
        StateParts {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            masses: &self.masses,
            accel: &mut self.accel,
        }
    }

    pub(crate) fn advance_clock(&mut self, dt: f64) {
        self.t += dt;
        self.steps += 1;
    }
}

pub(crate) struct StateParts<'a, const D: usize> {
    pub positions: &'a mut [NVec<D>],
    pub velocities: &'a mut [NVec<D>],
    pub masses: &'a [f64],
    pub accel: &'a mut [NVec<D>],
}
