//! Critical-level discretization for Simmer.
//!
//! Converts each species' continuous amount range into a finite,
//! strictly increasing set of levels: the finder collects candidates
//! from configuration, an order policy sorts and deduplicates them, and
//! the generator trims levels the species can never reach.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod finder;
mod generator;
mod order;

pub use error::LevelError;
pub use finder::{find_levels, LevelSource};
pub use generator::{generate, CriticalLevels};
pub use order::LevelOrder;
