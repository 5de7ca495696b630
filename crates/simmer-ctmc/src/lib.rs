//! Discrete state space and CTMC probability analyses for Simmer.
//!
//! Builds the combinatorial state space of a level-discretized reaction
//! network — every combination of per-species critical levels is one
//! state, packed into a flat arena by mixed-radix encoding — and runs
//! probability analyses over it: explicit transient propagation and
//! embedded-chain stationary iteration, plain or with per-state escape.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod report;
mod space;
mod stationary;
mod stats;
mod transient;

pub use error::SpaceError;
pub use report::write_report;
pub use space::{StateNode, StateSpace, Transition};
pub use stationary::{
    analyze_leaky_stationary, analyze_stationary, StationaryConfig, StationaryResult,
};
pub use stats::{BuildStats, StationaryStats, TransientStats};
pub use transient::{analyze_transient, TransientConfig, TransientResult};
