//! The Gillespie direct-method event loop.
//!
//! Samples exact trajectories of the raw (undiscretized) network: draw
//! an exponential waiting time from the total propensity, pick the
//! firing reaction by cumulative sum, apply its stoichiometry, repeat.
//! Propensities are cached per reaction and invalidated through the
//! network's species-to-dependent-reactions map, so a firing only
//! re-evaluates the laws it could have affected.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use simmer_core::{Properties, RateEvaluator, ReactionId, ReactionNetwork, SpeciesId};

use crate::{SsaError, TerminationDecider, TrajectoryWriter};

/// Configuration for the stochastic simulation engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SsaConfig {
    /// Hard time horizon of every run. Default 2100.0.
    pub time_limit: f64,
    /// Spacing of trajectory snapshots. Non-positive and non-finite
    /// values fall back to the default at engine construction. Default
    /// 10.0.
    pub print_interval: f64,
    /// Base RNG seed; later runs derive theirs from it. Default 314159.
    pub seed: u64,
    /// Number of runs. Default 1.
    pub runs: usize,
}

impl Default for SsaConfig {
    fn default() -> Self {
        Self {
            time_limit: 2100.0,
            print_interval: 10.0,
            seed: 314_159,
            runs: 1,
        }
    }
}

impl SsaConfig {
    /// Read `ssaTimeLimit`, `ssaPrintInterval`, `ssaSeed`, and
    /// `ssaRuns`, silently falling back to the defaults when missing or
    /// malformed.
    pub fn from_props(props: &Properties) -> Self {
        let d = Self::default();
        Self {
            time_limit: props.f64_or("ssaTimeLimit", d.time_limit),
            print_interval: props.f64_or("ssaPrintInterval", d.print_interval),
            seed: props.u64_or("ssaSeed", d.seed),
            runs: props.usize_or("ssaRuns", d.runs),
        }
    }
}

/// Counters from one simulation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Position of the run in the batch.
    pub run: usize,
    /// The seed this run was sampled with.
    pub seed: u64,
    /// Reaction firings.
    pub firings: u64,
    /// Kinetic-law evaluations (under-stocked reactions skip theirs).
    pub law_evaluations: u64,
    /// Simulated time the run ended at.
    pub final_time: f64,
}

/// The Gillespie stochastic simulation engine.
///
/// Holds the shared network and evaluator; per-run state (amounts,
/// propensity cache, RNG) is rebuilt from the initial quantities at the
/// start of every run, so successive runs are independent.
pub struct GillespieEngine<'a> {
    network: &'a ReactionNetwork,
    evaluator: &'a dyn RateEvaluator,
    config: SsaConfig,
}

impl<'a> GillespieEngine<'a> {
    /// Create an engine over `network`.
    ///
    /// Fails if any reaction is reversible: the sampler fires reactions
    /// one direction at a time, so a net two-way law cannot be drawn
    /// from. A non-positive or non-finite print interval in `config` is
    /// replaced with the default spacing.
    pub fn new(
        network: &'a ReactionNetwork,
        evaluator: &'a dyn RateEvaluator,
        config: SsaConfig,
    ) -> Result<Self, SsaError> {
        for reaction in network.reactions() {
            if reaction.reversible {
                return Err(SsaError::ReversibleReaction {
                    reaction: reaction.name.clone(),
                });
            }
        }
        // A zero, negative, or non-finite spacing could never advance
        // the tick cursor past an event time.
        let mut config = config;
        if !(config.print_interval > 0.0 && config.print_interval.is_finite()) {
            config.print_interval = SsaConfig::default().print_interval;
        }
        Ok(Self {
            network,
            evaluator,
            config,
        })
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SsaConfig {
        &self.config
    }

    /// Execute the configured number of runs.
    ///
    /// Run 0 uses the base seed; each later run derives its seed from
    /// the previous one, so a batch is reproducible from the base seed
    /// alone yet its runs are decorrelated. The decider is shared across
    /// the batch.
    pub fn run_all(
        &self,
        decider: &mut dyn TerminationDecider,
        writer: &mut dyn TrajectoryWriter,
    ) -> std::io::Result<Vec<RunStats>> {
        let mut stats = Vec::with_capacity(self.config.runs);
        let mut seed = self.config.seed;
        for run in 0..self.config.runs {
            stats.push(self.run_once(run, seed, decider, writer)?);
            seed = advance_seed(seed);
        }
        Ok(stats)
    }

    /// Execute a single run with an explicit seed.
    pub fn run_once(
        &self,
        run: usize,
        seed: u64,
        decider: &mut dyn TerminationDecider,
        writer: &mut dyn TrajectoryWriter,
    ) -> std::io::Result<RunStats> {
        let n_reactions = self.network.reaction_count();
        let names: Vec<&str> = self
            .network
            .species()
            .iter()
            .map(|s| s.name.as_str())
            .collect();

        // Fresh per-run state: the reset is what isolates runs.
        let mut amounts = self.network.initial_amounts();
        let mut propensities = vec![0.0f64; n_reactions];
        let mut dirty = vec![true; n_reactions];
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut stats = RunStats {
            run,
            seed,
            ..RunStats::default()
        };

        let limit = self.config.time_limit;
        let interval = self.config.print_interval;
        let mut time = 0.0f64;
        let mut next_print = interval;
        let mut last_emit = 0.0f64;

        writer.start_run(run)?;
        writer.header(&names)?;
        writer.snapshot(0.0, &amounts)?;

        loop {
            for r in 0..n_reactions {
                if dirty[r] {
                    propensities[r] =
                        self.propensity(ReactionId(r as u32), &amounts, &mut stats);
                    dirty[r] = false;
                }
            }
            let total: f64 = propensities.iter().sum();

            if decider.is_met(time, &amounts) {
                break;
            }

            // Nothing can fire anymore: the state is frozen, so the
            // run jumps straight to the horizon.
            if total <= 0.0 {
                time = limit;
                break;
            }

            let u: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
            let dt = -u.ln() / total;

            // The firing would land past the horizon: clamp the clock
            // and discard the event.
            if time + dt >= limit {
                time = limit;
                break;
            }
            time += dt;

            // Print ticks crossed by this step see the pre-firing
            // amounts.
            while next_print <= time {
                writer.snapshot(next_print, &amounts)?;
                last_emit = next_print;
                next_print += interval;
            }

            let threshold = rng.random::<f64>() * total;
            let Some(fired) = select_reaction(&propensities, threshold) else {
                time = limit;
                break;
            };
            self.fire(fired, &mut amounts, &mut dirty);
            stats.firings += 1;
        }

        // Catch up any remaining ticks, then the final time itself.
        while next_print <= time {
            writer.snapshot(next_print, &amounts)?;
            last_emit = next_print;
            next_print += interval;
        }
        if time > last_emit {
            writer.snapshot(time, &amounts)?;
        }
        writer.finish_run(run)?;

        stats.final_time = time;
        Ok(stats)
    }

    /// Propensity of one reaction at the current amounts: zero without
    /// evaluation when under-stocked, the law's rate clamped to zero
    /// when non-finite or negative otherwise.
    fn propensity(&self, reaction: ReactionId, amounts: &[f64], stats: &mut RunStats) -> f64 {
        let def = &self.network.reactions()[reaction.index()];
        for link in &def.reactants {
            if amounts[link.species.index()] < link.stoichiometry {
                return 0.0;
            }
        }
        stats.law_evaluations += 1;
        let rate = self.evaluator.rate(reaction, amounts);
        if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            0.0
        }
    }

    /// Apply one firing's stoichiometry and mark the dependents of
    /// every species whose amount actually changed. A species on both
    /// sides with equal coefficients nets to zero and invalidates
    /// nothing.
    fn fire(&self, reaction: ReactionId, amounts: &mut [f64], dirty: &mut [bool]) {
        let def = &self.network.reactions()[reaction.index()];
        let mut deltas: SmallVec<[(SpeciesId, f64); 4]> = SmallVec::new();
        for link in &def.reactants {
            accumulate(&mut deltas, link.species, -link.stoichiometry);
        }
        for link in &def.products {
            accumulate(&mut deltas, link.species, link.stoichiometry);
        }
        for (species, delta) in deltas {
            if delta == 0.0 {
                continue;
            }
            amounts[species.index()] += delta;
            for &r in self.network.dependents(species) {
                dirty[r.index()] = true;
            }
        }
    }
}

/// First reaction whose cumulative propensity reaches `threshold`;
/// zero-propensity reactions never win. None only when every propensity
/// is zero.
fn select_reaction(propensities: &[f64], threshold: f64) -> Option<ReactionId> {
    let mut acc = 0.0;
    let mut last_positive = None;
    for (r, &p) in propensities.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        acc += p;
        last_positive = Some(ReactionId(r as u32));
        if acc >= threshold {
            return last_positive;
        }
    }
    // Floating-point shortfall at the top of the range: the last
    // positive entry takes the draw.
    last_positive
}

fn accumulate(deltas: &mut SmallVec<[(SpeciesId, f64); 4]>, species: SpeciesId, delta: f64) {
    for entry in deltas.iter_mut() {
        if entry.0 == species {
            entry.1 += delta;
            return;
        }
    }
    deltas.push((species, delta));
}

/// SplitMix64 step: decorrelates successive run seeds while keeping the
/// whole batch a pure function of the base seed.
fn advance_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
