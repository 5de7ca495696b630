//! Run termination conditions.
//!
//! The engine polls its decider once per event-loop iteration; a decider
//! that returns true ends the run. Deciders also render a one-line
//! plain-text report in the same `#`-header format the analyzers use.

use std::fmt;
use std::io::{self, Write};

use simmer_core::{ReactionNetwork, SpeciesId};

use crate::SsaError;

/// Decides when a simulation run is finished.
pub trait TerminationDecider {
    /// Whether the run should stop, given the current time and amounts.
    ///
    /// Called once per event-loop iteration, before the next firing.
    /// `amounts` is indexed by [`SpeciesId`].
    fn is_met(&mut self, time: f64, amounts: &[f64]) -> bool;

    /// Write a `#`-header line and one data line describing the outcome.
    fn report(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Stops when simulated time reaches a fixed limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeLimitDecider {
    limit: f64,
}

impl TimeLimitDecider {
    /// Stop at `limit`.
    pub fn new(limit: f64) -> Self {
        Self { limit }
    }
}

impl TerminationDecider for TimeLimitDecider {
    fn is_met(&mut self, time: f64, _amounts: &[f64]) -> bool {
        time >= self.limit
    }

    fn report(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# timeLimit")?;
        writeln!(out, "{}", self.limit)
    }
}

/// Direction of a threshold comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    /// Fires when the amount climbs to or above the threshold.
    GreaterOrEqual,
    /// Fires when the amount falls to or below the threshold.
    LessOrEqual,
}

impl Comparator {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterOrEqual => value >= threshold,
            Self::LessOrEqual => value <= threshold,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreaterOrEqual => write!(f, ">="),
            Self::LessOrEqual => write!(f, "<="),
        }
    }
}

/// Stops when one species' amount crosses a threshold, with a time-limit
/// fallback so a trajectory that never crosses still terminates.
///
/// The species name is resolved once, at construction; an unresolvable
/// name is a typed error, not a silent no-op.
#[derive(Clone, Debug)]
pub struct ThresholdDecider {
    species: SpeciesId,
    name: String,
    comparator: Comparator,
    threshold: f64,
    time_limit: f64,
    reached_at: Option<f64>,
}

impl ThresholdDecider {
    /// Watch `species` in `network` against `threshold`, falling back
    /// to `time_limit` when the threshold is never crossed.
    pub fn new(
        network: &ReactionNetwork,
        species: &str,
        comparator: Comparator,
        threshold: f64,
        time_limit: f64,
    ) -> Result<Self, SsaError> {
        let id = network
            .species_id(species)
            .ok_or_else(|| SsaError::UnknownSpecies {
                name: species.to_string(),
            })?;
        Ok(Self {
            species: id,
            name: species.to_string(),
            comparator,
            threshold,
            time_limit,
            reached_at: None,
        })
    }

    /// The time the threshold was first met, if it was.
    pub fn reached_at(&self) -> Option<f64> {
        self.reached_at
    }
}

impl TerminationDecider for ThresholdDecider {
    fn is_met(&mut self, time: f64, amounts: &[f64]) -> bool {
        if self.comparator.holds(amounts[self.species.index()], self.threshold) {
            self.reached_at.get_or_insert(time);
            return true;
        }
        time >= self.time_limit
    }

    fn report(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# species comparator threshold reached time")?;
        match self.reached_at {
            Some(t) => writeln!(
                out,
                "{} {} {} true {t}",
                self.name, self.comparator, self.threshold
            ),
            None => writeln!(
                out,
                "{} {} {} false -",
                self.name, self.comparator, self.threshold
            ),
        }
    }
}
