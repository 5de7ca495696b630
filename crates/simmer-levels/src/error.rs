//! Error type for level discretization.

use std::error::Error;
use std::fmt;

/// Errors from level collection, ordering, and validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// A configured ordering policy name is not recognized.
    UnknownOrder {
        /// The unrecognized name.
        name: String,
    },
    /// A configured level-source name is not recognized.
    UnknownSource {
        /// The unrecognized name.
        name: String,
    },
    /// A level array was constructed with no entries.
    Empty,
    /// Level values are not strictly increasing.
    NotAscending {
        /// Index of the first value that fails to increase.
        index: usize,
    },
    /// The initial-level index points outside the value array.
    InitialOutOfRange {
        /// The rejected index.
        initial: usize,
        /// Number of levels.
        len: usize,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOrder { name } => {
                write!(f, "unknown level-order policy '{name}' (known: distinct)")
            }
            Self::UnknownSource { name } => {
                write!(
                    f,
                    "unknown level source '{name}' (known: properties, calculated, both)"
                )
            }
            Self::Empty => write!(f, "level array must hold at least one level"),
            Self::NotAscending { index } => {
                write!(f, "level values must be strictly increasing (violated at index {index})")
            }
            Self::InitialOutOfRange { initial, len } => {
                write!(f, "initial level index {initial} out of range for {len} levels")
            }
        }
    }
}

impl Error for LevelError {}
