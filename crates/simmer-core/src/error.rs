//! Error types shared across the Simmer workspace.
//!
//! Structural problems (bad network wiring, unparsable laws) are typed
//! errors raised at construction time. Numerical oddities during analysis
//! are not errors; they have defined fallbacks at their use sites.

use std::error::Error;
use std::fmt;

use crate::{ReactionId, SpeciesId};

/// Errors detected while constructing a [`ReactionNetwork`](crate::ReactionNetwork).
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// The network has no species at all.
    NoSpecies,
    /// A species was registered with an empty name.
    EmptySpeciesName {
        /// Position of the offending species in the input list.
        index: usize,
    },
    /// Two species share the same name.
    DuplicateSpeciesName {
        /// The name that appears more than once.
        name: String,
    },
    /// A species' initial amount is negative, NaN, or infinite.
    InvalidInitialAmount {
        /// Name of the offending species.
        species: String,
        /// The rejected value.
        value: f64,
    },
    /// A reaction was registered with an empty name.
    EmptyReactionName {
        /// Position of the offending reaction in the input list.
        index: usize,
    },
    /// A reactant, product, or modifier references a species ID outside
    /// the network.
    SpeciesOutOfRange {
        /// Name of the reaction holding the dangling reference.
        reaction: String,
        /// The out-of-range ID.
        species: SpeciesId,
    },
    /// A stoichiometric coefficient is zero, negative, NaN, or infinite.
    InvalidStoichiometry {
        /// Name of the offending reaction.
        reaction: String,
        /// The species the coefficient was attached to.
        species: SpeciesId,
        /// The rejected value.
        value: f64,
    },
    /// Species or reaction count exceeds `u32::MAX` and cannot be indexed.
    CountOverflow {
        /// Which list overflowed (`"species"` or `"reaction"`).
        what: &'static str,
        /// The offending count.
        value: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpecies => write!(f, "network has no species"),
            Self::EmptySpeciesName { index } => {
                write!(f, "species at position {index} has an empty name")
            }
            Self::DuplicateSpeciesName { name } => {
                write!(f, "duplicate species name '{name}'")
            }
            Self::InvalidInitialAmount { species, value } => {
                write!(
                    f,
                    "initial amount of species '{species}' must be finite and non-negative, got {value}"
                )
            }
            Self::EmptyReactionName { index } => {
                write!(f, "reaction at position {index} has an empty name")
            }
            Self::SpeciesOutOfRange { reaction, species } => {
                write!(
                    f,
                    "reaction '{reaction}' references species {species} which is not in the network"
                )
            }
            Self::InvalidStoichiometry {
                reaction,
                species,
                value,
            } => {
                write!(
                    f,
                    "reaction '{reaction}' has stoichiometry {value} for species {species}; \
                     coefficients must be finite and positive"
                )
            }
            Self::CountOverflow { what, value } => {
                write!(f, "{what} count {value} exceeds u32::MAX")
            }
        }
    }
}

impl Error for ModelError {}

/// Errors detected while constructing a rate evaluator.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalError {
    /// A reaction's kinetic-law expression failed to parse.
    LawParse {
        /// Name of the reaction whose law is malformed.
        reaction: String,
        /// Parser diagnostic.
        detail: String,
    },
    /// The rate-constant table does not line up with the reaction list.
    ConstantCount {
        /// Number of reactions in the network.
        expected: usize,
        /// Number of constants supplied.
        got: usize,
    },
    /// A rate constant is NaN or infinite.
    InvalidConstant {
        /// The reaction the constant belongs to.
        reaction: ReactionId,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LawParse { reaction, detail } => {
                write!(f, "kinetic law of reaction '{reaction}' failed to parse: {detail}")
            }
            Self::ConstantCount { expected, got } => {
                write!(f, "expected {expected} rate constants, got {got}")
            }
            Self::InvalidConstant { reaction, value } => {
                write!(f, "rate constant for reaction {reaction} must be finite, got {value}")
            }
        }
    }
}

impl Error for EvalError {}
