pub mod simulation;
pub mod configuration;

pub use simulation::states::{Body, ParticleSystem, System2, System3, NVec, NVec2, NVec3};
pub use simulation::params::{SimulationConfig, BoundaryMode, Integrator, DEFAULT_G};
pub use simulation::error::{SimError, SimResult};
pub use simulation::engine::Simulator;
pub use simulation::forces::NewtonianGravity;
pub use simulation::integrator::step;
pub use simulation::diagnostics::{compute_energy, total_momentum, center_of_mass, total_mass, relative_drift, Energy, EnergyRecord};
pub use simulation::density::DensityGrid;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BodyConfig, InitialConditionsConfig, UniformBoxConfig, TwoBodyConfig, ConfigError};
