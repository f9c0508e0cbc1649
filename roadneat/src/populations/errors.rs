use std::error::Error;
use std::fmt;

/// Error type for evolution cycle failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvolutionError {
    /// Selection would leave too few survivors to breed a new
    /// generation. The population is left untouched.
    EmptyPopulation,
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionError::EmptyPopulation => write!(
                f,
                "selection cannot keep enough survivors to breed a new generation"
            ),
        }
    }
}

impl Error for EvolutionError {}
