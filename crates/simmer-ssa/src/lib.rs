//! Gillespie stochastic simulation for Simmer.
//!
//! An exact discrete-event sampler over the raw reaction network: the
//! direct method draws exponential waiting times from the total
//! propensity and picks firing reactions by cumulative sum. Propensities
//! are cached and invalidated through the network's dependency map, runs
//! are reproducible from a single base seed, and termination conditions
//! and trajectory sinks are pluggable.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod termination;
mod trace;

pub use engine::{GillespieEngine, RunStats, SsaConfig};
pub use error::SsaError;
pub use termination::{Comparator, TerminationDecider, ThresholdDecider, TimeLimitDecider};
pub use simmer_core::TrajectoryWriter;
pub use trace::{NullTrajectoryWriter, TsvTrajectoryWriter};
