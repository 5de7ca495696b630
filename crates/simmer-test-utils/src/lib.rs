//! Test utilities and mock types for Simmer development.
//!
//! Provides a programmable [`MockEvaluator`] implementing
//! [`RateEvaluator`], an in-memory [`CollectingTrajectoryWriter`], and
//! fixture networks shared by cross-crate tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::collections::HashMap;
use std::io;

use simmer_core::{RateEvaluator, ReactionId, TrajectoryWriter};

mod fixtures;

pub use fixtures::{birth_death, degradation_chain, independent_pair};

/// Mock implementation of [`RateEvaluator`].
///
/// Pre-program per-reaction rates with
/// [`set_rate`](MockEvaluator::set_rate) before passing to code under
/// test; unprogrammed reactions return the default rate. Evaluation
/// calls are counted so tests can assert on cache behaviour.
pub struct MockEvaluator {
    rates: HashMap<ReactionId, f64>,
    default: f64,
    calls: Cell<u64>,
}

impl MockEvaluator {
    /// All rates default to zero.
    pub fn new() -> Self {
        Self::with_default(0.0)
    }

    /// Unprogrammed reactions evaluate to `default`.
    pub fn with_default(default: f64) -> Self {
        Self {
            rates: HashMap::new(),
            default,
            calls: Cell::new(0),
        }
    }

    /// Program the rate of one reaction.
    pub fn set_rate(&mut self, reaction: ReactionId, rate: f64) {
        self.rates.insert(reaction, rate);
    }

    /// Number of evaluation calls so far.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RateEvaluator for MockEvaluator {
    fn rate(&self, reaction: ReactionId, _amounts: &[f64]) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.rates.get(&reaction).copied().unwrap_or(self.default)
    }
}

/// Everything one run emitted through a [`TrajectoryWriter`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunTrace {
    pub run: usize,
    pub species: Vec<String>,
    pub snapshots: Vec<(f64, Vec<f64>)>,
}

/// In-memory [`TrajectoryWriter`] for asserting on emitted snapshots.
#[derive(Clone, Debug, Default)]
pub struct CollectingTrajectoryWriter {
    pub runs: Vec<RunTrace>,
}

impl CollectingTrajectoryWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrajectoryWriter for CollectingTrajectoryWriter {
    fn start_run(&mut self, run: usize) -> io::Result<()> {
        self.runs.push(RunTrace {
            run,
            ..RunTrace::default()
        });
        Ok(())
    }

    fn header(&mut self, species: &[&str]) -> io::Result<()> {
        if let Some(trace) = self.runs.last_mut() {
            trace.species = species.iter().map(|s| s.to_string()).collect();
        }
        Ok(())
    }

    fn snapshot(&mut self, time: f64, amounts: &[f64]) -> io::Result<()> {
        if let Some(trace) = self.runs.last_mut() {
            trace.snapshots.push((time, amounts.to_vec()));
        }
        Ok(())
    }

    fn finish_run(&mut self, _run: usize) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_evaluator_returns_programmed_rates_and_counts() {
        let mut eval = MockEvaluator::with_default(1.5);
        eval.set_rate(ReactionId(1), 4.0);

        assert_eq!(eval.rate(ReactionId(0), &[]), 1.5);
        assert_eq!(eval.rate(ReactionId(1), &[]), 4.0);
        assert_eq!(eval.calls(), 2);
    }

    #[test]
    fn collecting_writer_groups_by_run() {
        let mut writer = CollectingTrajectoryWriter::new();
        writer.start_run(0).unwrap();
        writer.header(&["X"]).unwrap();
        writer.snapshot(0.0, &[2.0]).unwrap();
        writer.finish_run(0).unwrap();
        writer.start_run(1).unwrap();
        writer.header(&["X"]).unwrap();
        writer.snapshot(0.0, &[2.0]).unwrap();
        writer.snapshot(1.0, &[3.0]).unwrap();
        writer.finish_run(1).unwrap();

        assert_eq!(writer.runs.len(), 2);
        assert_eq!(writer.runs[0].snapshots.len(), 1);
        assert_eq!(writer.runs[1].snapshots, vec![(0.0, vec![2.0]), (1.0, vec![3.0])]);
    }
}
