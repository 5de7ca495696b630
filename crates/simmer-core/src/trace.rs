//! The trajectory sink seam.
//!
//! Simulation engines emit per-run snapshots through
//! [`TrajectoryWriter`]; the sink decides what to do with them. The
//! trait lives here beside [`RateEvaluator`](crate::RateEvaluator) so
//! sinks and test fixtures can be written without depending on any
//! engine crate.

use std::io;

/// Receives the trajectory of each simulation run.
pub trait TrajectoryWriter {
    /// A run is about to start.
    fn start_run(&mut self, run: usize) -> io::Result<()>;
    /// Species names, in [`SpeciesId`](crate::SpeciesId) order.
    fn header(&mut self, species: &[&str]) -> io::Result<()>;
    /// Species amounts at `time`, in the header's order.
    fn snapshot(&mut self, time: f64, amounts: &[f64]) -> io::Result<()>;
    /// The run has ended.
    fn finish_run(&mut self, run: usize) -> io::Result<()>;
}
