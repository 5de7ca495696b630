//! Explicit transient probability propagation.
//!
//! First-order forward stepping of the master equation. The step width
//! is fixed once for the whole run: a safety fraction of the reciprocal
//! of the single largest per-state outflow, which keeps every state's
//! no-transition probability inside [0, 1] unconditionally.

use simmer_core::{Properties, StateIndex};

use crate::{StateSpace, TransientStats};

/// Configuration for the transient analyzer.
#[derive(Clone, Debug, PartialEq)]
pub struct TransientConfig {
    /// Analysis horizon. Default 0.01.
    pub time_limit: f64,
    /// Safety fraction dividing the largest outflow to get the global
    /// step width. Default 0.1.
    pub step_fraction: f64,
}

impl Default for TransientConfig {
    fn default() -> Self {
        Self {
            time_limit: 0.01,
            step_fraction: 0.1,
        }
    }
}

impl TransientConfig {
    /// Read `transientTimeLimit` and `transientStepFraction`, silently
    /// falling back to the defaults when missing or malformed.
    pub fn from_props(props: &Properties) -> Self {
        let d = Self::default();
        Self {
            time_limit: props.f64_or("transientTimeLimit", d.time_limit),
            step_fraction: props.f64_or("transientStepFraction", d.step_fraction),
        }
    }
}

/// Outcome of a transient analysis.
#[derive(Clone, Debug)]
pub struct TransientResult {
    /// Per-state probability at the end of the run, indexed by state.
    pub probabilities: Vec<f64>,
    /// Step counters.
    pub stats: TransientStats,
}

/// Propagate probability mass from the initial state to the horizon.
///
/// Each step moves `min(rate * dt, 1)` of a state's current mass along
/// every outgoing transition and keeps `max(0, 1 - outflow * dt)` in
/// place. A space with no outgoing rates at all takes its steps with
/// `dt` equal to the whole horizon. Probability is conserved exactly as
/// long as no per-transition probability saturates the clamp, which the
/// step-width choice guarantees for fractions up to 1.
pub fn analyze_transient(space: &StateSpace, config: &TransientConfig) -> TransientResult {
    let n = space.state_count();
    let mut cur = vec![0.0f64; n];
    cur[space.initial_state().0] = 1.0;

    let outflow: Vec<f64> = (0..n).map(|s| space.outflow(StateIndex(s))).collect();
    let max_outflow = outflow.iter().fold(0.0f64, |a, &b| a.max(b));
    let dt = if max_outflow > 0.0 {
        config.step_fraction / max_outflow
    } else {
        config.time_limit
    };

    let mut stats = TransientStats { steps: 0, dt };
    if dt <= 0.0 || !dt.is_finite() {
        return TransientResult {
            probabilities: cur,
            stats,
        };
    }

    let hold: Vec<f64> = outflow.iter().map(|&o| (1.0 - o * dt).max(0.0)).collect();
    let mut next = vec![0.0f64; n];
    let mut elapsed = 0.0;
    while elapsed <= config.time_limit {
        next.fill(0.0);
        for s in 0..n {
            let mass = cur[s];
            if mass == 0.0 {
                continue;
            }
            next[s] += mass * hold[s];
            for t in space.transitions(StateIndex(s)) {
                next[t.target.0] += (t.rate * dt).min(1.0) * mass;
            }
        }
        std::mem::swap(&mut cur, &mut next);
        elapsed += dt;
        stats.steps += 1;
    }

    TransientResult {
        probabilities: cur,
        stats,
    }
}
