pub mod states;
pub mod params;
pub mod error;
pub mod engine;
pub mod forces;
pub mod boundary;
pub mod integrator;
pub mod diagnostics;
pub mod density;
pub mod scenario;
