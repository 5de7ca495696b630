//! Error type for stochastic simulation setup.

use std::error::Error;
use std::fmt;

/// Errors from configuring a simulation run.
///
/// Numerical oddities during a run (zero total propensity, non-finite
/// law results) are not errors; they have defined fallbacks inside the
/// engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SsaError {
    /// The network contains a reversible reaction, which the sampler
    /// cannot fire. Split it into two irreversible reactions upstream.
    ReversibleReaction {
        /// Name of the offending reaction.
        reaction: String,
    },
    /// A configured species name resolves to no species in the network.
    UnknownSpecies {
        /// The unresolvable name.
        name: String,
    },
}

impl fmt::Display for SsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReversibleReaction { reaction } => {
                write!(
                    f,
                    "reaction '{reaction}' is reversible; split it before simulating"
                )
            }
            Self::UnknownSpecies { name } => {
                write!(f, "species '{name}' is not in the network")
            }
        }
    }
}

impl Error for SsaError {}
