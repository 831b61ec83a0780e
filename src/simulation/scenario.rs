//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario<D>`) containing:
//! - a validated `Simulator` with bodies at t = 0
//! - the run length and energy reporting interval for the driver
//!
//! Sampled initial conditions use a seeded `Pcg64Mcg`, so the same config
//! always produces the same bodies.

use log::{debug, info};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_distr::Normal;
use rand_pcg::Pcg64Mcg;

use crate::configuration::config::{
    BodyConfig, InitialConditionsConfig, ScenarioConfig, TwoBodyConfig, UniformBoxConfig,
};

use super::density::DensityGrid;
use super::engine::Simulator;
use super::error::{SimError, SimResult};
use super::states::{Body, NVec, ParticleSystem};

#[derive(Debug, Clone)]
pub struct Scenario<const D: usize> {
    pub simulator: Simulator<D>,
    pub steps: u64,
    pub energy_every: u64,
}

impl<const D: usize> Scenario<D> {
    pub fn build(cfg: &ScenarioConfig) -> SimResult<Self> {
        if cfg.engine.dimension != D {
            return Err(SimError::DimensionMismatch {
                what: "engine.dimension",
                expected: D,
                found: cfg.engine.dimension,
            });
        }

        let sim_cfg = cfg.simulation_config();
        let bodies = match &cfg.initial {
            InitialConditionsConfig::Explicit { bodies } => explicit_bodies(bodies)?,
            InitialConditionsConfig::UniformBox(ub) => uniform_box(ub)?,
            InitialConditionsConfig::TwoBody(tb) => two_body(tb, sim_cfg.gravitational_constant)?,
        };
        info!("Building {}D scenario with {} bodies", D, bodies.len());

        let system = ParticleSystem::from_bodies(bodies)?;
        let simulator = Simulator::new(system, sim_cfg)?;

        Ok(Self {
            simulator,
            steps: cfg.parameters.steps,
            energy_every: cfg.parameters.energy_every,
        })
    }

    /// Density of the current state on the configured periodic domain
    pub fn density(&self, ngrid: usize, cloud_in_cell: bool) -> SimResult<DensityGrid<D>> {
        let l = self
            .simulator
            .config()
            .domain_size
            .ok_or_else(|| SimError::invalid("density grid needs a domain_size"))?;
        let sys = self.simulator.system();
        if cloud_in_cell {
            DensityGrid::cloud_in_cell(sys, ngrid, l)
        } else {
            DensityGrid::nearest_grid_point(sys, ngrid, l)
        }
    }
}

fn to_vector<const D: usize>(what: &'static str, xs: &[f64]) -> SimResult<NVec<D>> {
    if xs.len() != D {
        return Err(SimError::DimensionMismatch {
            what,
            expected: D,
            found: xs.len(),
        });
    }
    Ok(NVec::<D>::from_column_slice(xs))
}

fn explicit_bodies<const D: usize>(bodies: &[BodyConfig]) -> SimResult<Vec<Body<D>>> {
    bodies
        .iter()
        .map(|bc| {
            Ok(Body {
                x: to_vector("body position", &bc.x)?,
                v: to_vector("body velocity", &bc.v)?,
                m: bc.m,
            })
        })
        .collect()
}

/// Equal masses uniform in `[0, box_size)^D`, Gaussian velocities
pub fn uniform_box<const D: usize>(cfg: &UniformBoxConfig) -> SimResult<Vec<Body<D>>> {
    if !(cfg.box_size.is_finite() && cfg.box_size > 0.0) {
        return Err(SimError::invalid(format!("box_size must be positive, got {}", cfg.box_size)));
    }
    let mut rng = Pcg64Mcg::seed_from_u64(cfg.seed);
    let x_distr = Uniform::new(0.0, cfg.box_size);
    let v_distr = Normal::new(0.0, cfg.velocity_dispersion)
        .map_err(|e| SimError::invalid(format!("velocity_dispersion: {e}")))?;

    debug!(
        "uniform_box(n={}, box_size={}, sigma_v={}, seed={})",
        cfg.n, cfg.box_size, cfg.velocity_dispersion, cfg.seed
    );

    let bodies = (0..cfg.n)
        .map(|_| {
            let x = NVec::<D>::from_fn(|_, _| x_distr.sample(&mut rng));
            let v = NVec::<D>::from_fn(|_, _| v_distr.sample(&mut rng));
            Body::new(x, v, cfg.mass)
        })
        .collect();
    Ok(bodies)
}

/// Two bodies separated along x about `center`; with `circular`, the y
/// velocities of an unsoftened circular Kepler orbit and zero net momentum
pub fn two_body<const D: usize>(cfg: &TwoBodyConfig, g: f64) -> SimResult<Vec<Body<D>>> {
    if D < 2 {
        return Err(SimError::invalid("two-body orbit needs at least two dimensions"));
    }
    let total = cfg.m1 + cfg.m2;
    if !(total.is_finite() && total > 0.0) {
        return Err(SimError::invalid("two-body masses must sum to a positive value"));
    }
    if !(cfg.separation.is_finite() && cfg.separation > 0.0) {
        return Err(SimError::invalid(format!(
            "two-body separation must be positive, got {}",
            cfg.separation
        )));
    }
    let center = match &cfg.center {
        Some(c) => to_vector::<D>("two_body center", c)?,
        None => NVec::<D>::zeros(),
    };

    let mut ex = NVec::<D>::zeros();
    ex[0] = 1.0;
    let mut ey = NVec::<D>::zeros();
    ey[1] = 1.0;

    // distances of each body from the centre of mass
    let r1 = cfg.separation * cfg.m2 / total;
    let r2 = cfg.separation * cfg.m1 / total;

    let (v1, v2) = if cfg.circular {
        let v_rel = (g * total / cfg.separation).sqrt();
        if !v_rel.is_finite() {
            return Err(SimError::invalid(format!("no circular orbit for G = {g}")));
        }
        (-(cfg.m2 / total) * v_rel * ey, (cfg.m1 / total) * v_rel * ey)
    } else {
        (NVec::<D>::zeros(), NVec::<D>::zeros())
    };

    Ok(vec![
        Body::new(center - r1 * ex, v1, cfg.m1),
        Body::new(center + r2 * ex, v2, cfg.m2),
    ])
}
