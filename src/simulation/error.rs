//! Error type shared by the simulation core
//!
//! Numerical edge cases (coinciding particles, escaping particles) are not
//! errors; only malformed input is reported here.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value or particle property is out of range
    InvalidConfiguration(String),
    /// Parallel input arrays (or vector components) disagree in length
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            SimError::DimensionMismatch { what, expected, found } => {
                write!(f, "dimension mismatch in {what}: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
