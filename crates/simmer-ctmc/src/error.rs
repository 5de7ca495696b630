//! Error type for state-space construction.

use std::error::Error;
use std::fmt;

/// Errors from building a [`StateSpace`](crate::StateSpace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// The level-array list does not line up with the network's species.
    AxisCount {
        /// Number of species in the network.
        expected: usize,
        /// Number of level arrays supplied.
        got: usize,
    },
    /// The product of per-species level counts overflows `usize`.
    TooLarge,
    /// The state arena could not be allocated.
    OutOfMemory {
        /// Number of states that was requested.
        states: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AxisCount { expected, got } => {
                write!(f, "expected {expected} level arrays (one per species), got {got}")
            }
            Self::TooLarge => write!(f, "state count overflows usize"),
            Self::OutOfMemory { states } => {
                write!(f, "failed to allocate arena for {states} states")
            }
        }
    }
}

impl Error for SpaceError {}
