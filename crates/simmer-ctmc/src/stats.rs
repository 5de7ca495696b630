//! Counters collected by the builder and the analyzers.
//!
//! Plain data, no side channels: each routine returns or exposes its
//! stats struct and the caller decides what to do with the numbers.

/// Counters from one state-space build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// States in the arena.
    pub states: usize,
    /// Total outgoing transitions across all states.
    pub transitions: usize,
    /// Kinetic-law evaluations performed.
    pub law_evaluations: u64,
    /// Rate lookups answered from the cache without re-evaluating.
    pub cache_hits: u64,
}

/// Counters from one transient analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransientStats {
    /// Steps taken.
    pub steps: u64,
    /// The fixed step width used for every step.
    pub dt: f64,
}

/// Counters from one stationary analysis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationaryStats {
    /// Jump-chain iterations performed.
    pub iterations: u64,
    /// Whether the even-iteration check fired before the cap.
    pub converged: bool,
    /// Total probability mass lost to escape (zero for the plain
    /// analysis).
    pub escaped_mass: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let b = BuildStats::default();
        assert_eq!(b.states, 0);
        assert_eq!(b.transitions, 0);
        assert_eq!(b.law_evaluations, 0);
        assert_eq!(b.cache_hits, 0);

        let t = TransientStats::default();
        assert_eq!(t.steps, 0);
        assert_eq!(t.dt, 0.0);

        let s = StationaryStats::default();
        assert_eq!(s.iterations, 0);
        assert!(!s.converged);
        assert_eq!(s.escaped_mass, 0.0);
    }
}
