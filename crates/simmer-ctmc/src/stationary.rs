//! Stationary analysis via the embedded jump chain.
//!
//! The CTMC's rates are normalized into a discrete jump-chain
//! distribution per state and power-iterated until the distribution
//! settles. Synchronous updates oscillate with period two on bipartite
//! chains (and every production/degradation space is bipartite), so
//! convergence is checked only on even iterations against the vector
//! from two iterations earlier. The converged chain distribution is then
//! weighted by time-in-state (the reciprocal outflow) and renormalized
//! to recover CTMC stationary probabilities.

use simmer_core::{Properties, StateIndex};

use crate::{StateSpace, StationaryStats};

/// Configuration for the stationary analyzers.
#[derive(Clone, Debug, PartialEq)]
pub struct StationaryConfig {
    /// Per-state absolute convergence tolerance. Default 1e-4.
    pub tolerance: f64,
    /// Iteration cap. Default 99_999.
    pub max_iterations: u64,
}

impl Default for StationaryConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 99_999,
        }
    }
}

impl StationaryConfig {
    /// Read `stationaryTolerance` and `stationaryMaxIterations`,
    /// silently falling back to the defaults when missing or malformed.
    pub fn from_props(props: &Properties) -> Self {
        let d = Self::default();
        Self {
            tolerance: props.f64_or("stationaryTolerance", d.tolerance),
            max_iterations: props.u64_or("stationaryMaxIterations", d.max_iterations),
        }
    }
}

/// Outcome of a stationary analysis.
#[derive(Clone, Debug)]
pub struct StationaryResult {
    /// CTMC stationary probability per state, indexed by state.
    pub probabilities: Vec<f64>,
    /// Iteration counters and the escaped-mass total.
    pub stats: StationaryStats,
}

/// Stationary distribution of the chain, no escape.
///
/// States with zero outflow are absorbing and keep their mass; the
/// converged jump-chain distribution is converted to continuous time by
/// dividing each entry by its state's outflow and renormalizing.
pub fn analyze_stationary(space: &StateSpace, config: &StationaryConfig) -> StationaryResult {
    power_iterate(space, None, config)
}

/// Stationary distribution under a per-state external escape rate.
///
/// Escape competes with the reaction transitions: a state's jump
/// probabilities are `rate / (outflow + escape)`, and the remaining
/// `escape / (outflow + escape)` share of its mass leaves the chain for
/// good. The cumulative escaped mass is reported in the stats; the
/// retained distribution plus the escaped mass accounts for all initial
/// probability.
///
/// # Panics
/// Panics if `escape` does not hold one rate per state.
pub fn analyze_leaky_stationary(
    space: &StateSpace,
    escape: &[f64],
    config: &StationaryConfig,
) -> StationaryResult {
    assert_eq!(escape.len(), space.state_count());
    power_iterate(space, Some(escape), config)
}

fn power_iterate(
    space: &StateSpace,
    escape: Option<&[f64]>,
    config: &StationaryConfig,
) -> StationaryResult {
    let n = space.state_count();
    let outflow: Vec<f64> = (0..n).map(|s| space.outflow(StateIndex(s))).collect();
    let denom: Vec<f64> = (0..n)
        .map(|s| outflow[s] + escape.map_or(0.0, |e| e[s]))
        .collect();

    let mut cur = vec![0.0f64; n];
    cur[space.initial_state().0] = 1.0;
    let mut next = vec![0.0f64; n];
    let mut checkpoint = cur.clone();

    let mut stats = StationaryStats::default();
    while stats.iterations < config.max_iterations {
        next.fill(0.0);
        for s in 0..n {
            let mass = cur[s];
            if mass == 0.0 {
                continue;
            }
            if denom[s] <= 0.0 {
                // Absorbing: nothing to jump to, nothing leaks.
                next[s] += mass;
                continue;
            }
            for t in space.transitions(StateIndex(s)) {
                next[t.target.0] += mass * t.rate / denom[s];
            }
            if let Some(e) = escape {
                stats.escaped_mass += mass * e[s] / denom[s];
            }
        }
        std::mem::swap(&mut cur, &mut next);
        stats.iterations += 1;

        // Even iterations only: comparing across two steps cancels the
        // period-two oscillation of synchronous updates.
        if stats.iterations % 2 == 0 {
            let delta = cur
                .iter()
                .zip(&checkpoint)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0f64, f64::max);
            if delta < config.tolerance {
                stats.converged = true;
                break;
            }
            checkpoint.copy_from_slice(&cur);
        }
    }

    // Jump-chain mass to CTMC probability: time in a state is inversely
    // proportional to its total leaving rate. Absorbing states carry
    // their chain mass through unscaled.
    let mut probabilities: Vec<f64> = (0..n)
        .map(|s| if denom[s] > 0.0 { cur[s] / denom[s] } else { cur[s] })
        .collect();
    let sum: f64 = probabilities.iter().sum();
    if sum > 0.0 {
        for p in &mut probabilities {
            *p /= sum;
        }
    }

    StationaryResult {
        probabilities,
        stats,
    }
}
