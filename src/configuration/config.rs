//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]            – dimension, integrator and boundary handling
//! - [`ParametersConfig`]        – numerical parameters and physical constants
//! - [`InitialConditionsConfig`] – explicit bodies or a sampled distribution
//! - [`ScenarioConfig`]          – top-level wrapper used to load a scenario
//!
//! # YAML format
//! An example 2D periodic scenario matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: 2                # 2 or 3
//!   integrator: leapfrog        # or position_verlet, symplectic_euler
//!   boundary: periodic          # or open
//!
//! parameters:
//!   time_step: 0.001
//!   softening_length: 0.05
//!   domain_size: 10.0           # required for periodic
//!   G: 1.0                      # optional, defaults to 1
//!   steps: 5000
//!   energy_every: 100
//!
//! initial:
//!   type: explicit
//!   bodies:
//!     - x: [ 4.5, 5.0 ]
//!       v: [ 0.0, 0.5 ]
//!       m: 1.0
//!     - x: [ 5.5, 5.0 ]
//!       v: [ 0.0, -0.5 ]
//!       m: 1.0
//! ```
//!
//! `initial` can also be `type: uniform_box` or `type: two_body`; see
//! [`UniformBoxConfig`] and [`TwoBodyConfig`].

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::params::{BoundaryMode, Integrator, SimulationConfig, DEFAULT_G};

/// Global engine options
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub dimension: usize, // 2 or 3
    #[serde(default)]
    pub integrator: Integrator, // fixed for the whole run
    #[serde(default)]
    pub boundary: BoundaryMode,
}

fn default_g() -> f64 {
    DEFAULT_G
}

fn default_energy_every() -> u64 {
    1
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub time_step: f64,
    #[serde(default)]
    pub softening_length: f64, // prevents singular forces at small separations
    #[serde(default)]
    pub domain_size: Option<f64>, // box edge, used by the periodic boundary and density grid
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default)]
    pub steps: u64, // number of steps the driver runs
    #[serde(default = "default_energy_every")]
    pub energy_every: u64, // driver reports energy every this many steps
}

/// Initial state of one body; vector lengths must match `engine.dimension`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>,
    pub v: Vec<f64>,
    pub m: f64,
}

/// `n` equal masses placed uniformly in `[0, box_size)^D`, with Gaussian
/// velocities of standard deviation `velocity_dispersion` per component
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UniformBoxConfig {
    pub n: usize,
    pub mass: f64,
    pub box_size: f64,
    #[serde(default)]
    pub velocity_dispersion: f64,
    #[serde(default)]
    pub seed: u64,
}

/// Two bodies on the x axis about their common centre of mass. With
/// `circular`, velocities along y give a circular Kepler orbit
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TwoBodyConfig {
    pub m1: f64,
    pub m2: f64,
    pub separation: f64,
    #[serde(default)]
    pub circular: bool,
    #[serde(default)]
    pub center: Option<Vec<f64>>, // defaults to the origin
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InitialConditionsConfig {
    Explicit { bodies: Vec<BodyConfig> },
    UniformBox(UniformBoxConfig),
    TwoBody(TwoBodyConfig),
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub initial: InitialConditionsConfig,
}

impl ScenarioConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Runtime integrator settings; not validated until a simulator is built
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            softening_length: self.parameters.softening_length,
            time_step: self.parameters.time_step,
            domain_size: self.parameters.domain_size,
            boundary: self.engine.boundary,
            gravitational_constant: self.parameters.g,
            integrator: self.engine.integrator,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read scenario: {e}"),
            ConfigError::Yaml(e) => write!(f, "failed to parse scenario: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}
