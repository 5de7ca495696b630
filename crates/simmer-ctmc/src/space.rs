//! The discrete state space of a level-discretized network.
//!
//! Every combination of per-species level indices is one state. States
//! live in a flat arena indexed by [`StateIndex`]; the mixed-radix
//! encoding maps an index vector to its arena slot via per-species
//! place-value multipliers. Transitions carry destination indices, never
//! references.

use simmer_core::{RateEvaluator, ReactionId, ReactionNetwork, SpeciesId, StateIndex};
use simmer_levels::CriticalLevels;
use smallvec::SmallVec;

use crate::{BuildStats, SpaceError};

/// One outgoing transition of a state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Destination state.
    pub target: StateIndex,
    /// Instantaneous rate. Strictly positive; zero-rate transitions are
    /// never emitted.
    pub rate: f64,
}

/// One discrete state: its outgoing transitions.
///
/// Inline capacity 4 keeps one production and one degradation edge per
/// species off the heap for two-species models.
#[derive(Clone, Debug, Default)]
pub struct StateNode {
    /// Outgoing transitions, production before degradation per species,
    /// species in axis order.
    pub transitions: SmallVec<[Transition; 4]>,
}

/// The combinatorial state space of a discretized network, with one
/// CTMC transition set per state.
#[derive(Clone, Debug)]
pub struct StateSpace {
    axes: Vec<CriticalLevels>,
    multipliers: Vec<usize>,
    states: Vec<StateNode>,
    initial: StateIndex,
    stats: BuildStats,
}

impl StateSpace {
    /// Enumerate every state and synthesize its transitions.
    ///
    /// Rates are evaluated with each species substituted by its level
    /// value at the visited state. A rate cache keyed by the network's
    /// dependency map skips re-evaluation of laws whose inputs did not
    /// change between neighbouring states of the enumeration. Reactions
    /// under-stocked at a state (any reactant's level value below its
    /// stoichiometry) are forced to rate zero without touching the law;
    /// non-finite and negative law results clamp to zero.
    pub fn build(
        network: &ReactionNetwork,
        evaluator: &dyn RateEvaluator,
        axes: Vec<CriticalLevels>,
    ) -> Result<Self, SpaceError> {
        // 1. One axis per species, multipliers as running products.
        if axes.len() != network.species_count() {
            return Err(SpaceError::AxisCount {
                expected: network.species_count(),
                got: axes.len(),
            });
        }
        let mut multipliers = Vec::with_capacity(axes.len());
        let mut total: usize = 1;
        for axis in &axes {
            multipliers.push(total);
            total = total.checked_mul(axis.len()).ok_or(SpaceError::TooLarge)?;
        }

        // 2. Arena allocation is the one failure mode that scales with
        //    the model, so it reports instead of aborting.
        let mut states: Vec<StateNode> = Vec::new();
        states
            .try_reserve_exact(total)
            .map_err(|_| SpaceError::OutOfMemory { states: total })?;

        // 3. Per-species production and degradation contributors.
        let n_species = axes.len();
        let n_reactions = network.reaction_count();
        let mut producers: Vec<Vec<(ReactionId, f64)>> = vec![Vec::new(); n_species];
        let mut consumers: Vec<Vec<(ReactionId, f64)>> = vec![Vec::new(); n_species];
        for (i, reaction) in network.reactions().iter().enumerate() {
            let rid = ReactionId(i as u32);
            for link in &reaction.products {
                producers[link.species.index()].push((rid, link.stoichiometry));
            }
            for link in &reaction.reactants {
                consumers[link.species.index()].push((rid, link.stoichiometry));
            }
        }

        // 4. Ripple-carry enumeration with a dirty-rate cache.
        let mut indices = vec![0usize; n_species];
        let mut amounts: Vec<f64> = axes.iter().map(|a| a.value(0)).collect();
        let mut rates = vec![0.0f64; n_reactions];
        let mut dirty = vec![true; n_reactions];
        let mut stats = BuildStats {
            states: total,
            ..BuildStats::default()
        };

        loop {
            for r in 0..n_reactions {
                if dirty[r] {
                    rates[r] =
                        clamped_rate(network, evaluator, ReactionId(r as u32), &amounts, &mut stats);
                    dirty[r] = false;
                } else {
                    stats.cache_hits += 1;
                }
            }

            let here = states.len();
            let mut node = StateNode::default();
            for (i, axis) in axes.iter().enumerate() {
                let li = indices[i];
                if li + 1 < axis.len() {
                    let flow: f64 = producers[i]
                        .iter()
                        .map(|&(r, stoich)| stoich * rates[r.index()])
                        .sum();
                    let gap = axis.value(li + 1) - axis.value(li);
                    if flow > 0.0 && gap > 0.0 {
                        node.transitions.push(Transition {
                            target: StateIndex(here + multipliers[i]),
                            rate: flow / gap,
                        });
                        stats.transitions += 1;
                    }
                }
                if li > 0 {
                    let flow: f64 = consumers[i]
                        .iter()
                        .map(|&(r, stoich)| stoich * rates[r.index()])
                        .sum();
                    let gap = axis.value(li) - axis.value(li - 1);
                    if flow > 0.0 && gap > 0.0 {
                        node.transitions.push(Transition {
                            target: StateIndex(here - multipliers[i]),
                            rate: flow / gap,
                        });
                        stats.transitions += 1;
                    }
                }
            }
            states.push(node);

            if !advance(network, &axes, &mut indices, &mut amounts, &mut dirty) {
                break;
            }
        }
        debug_assert_eq!(states.len(), total);

        // 5. Initial state from each axis's initial level index.
        let initial = StateIndex(
            axes.iter()
                .zip(&multipliers)
                .map(|(axis, m)| axis.initial_index() * m)
                .sum(),
        );

        Ok(Self {
            axes,
            multipliers,
            states,
            initial,
            stats,
        })
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The state holding the network's initial amounts.
    pub fn initial_state(&self) -> StateIndex {
        self.initial
    }

    /// Outgoing transitions of `state`.
    ///
    /// # Panics
    /// Panics if `state` did not come from this space.
    pub fn transitions(&self, state: StateIndex) -> &[Transition] {
        &self.states[state.0].transitions
    }

    /// Total outgoing rate of `state`.
    ///
    /// # Panics
    /// Panics if `state` did not come from this space.
    pub fn outflow(&self, state: StateIndex) -> f64 {
        self.states[state.0]
            .transitions
            .iter()
            .map(|t| t.rate)
            .sum()
    }

    /// The per-species level arrays, indexed by [`SpeciesId`].
    pub fn axes(&self) -> &[CriticalLevels] {
        &self.axes
    }

    /// Counters from the build.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Pack per-species level indices into a state index.
    ///
    /// # Panics
    /// Panics if `indices` does not hold one in-range entry per species.
    pub fn encode(&self, indices: &[usize]) -> StateIndex {
        assert_eq!(indices.len(), self.axes.len());
        let mut packed = 0;
        for ((&li, axis), &m) in indices.iter().zip(&self.axes).zip(&self.multipliers) {
            assert!(li < axis.len());
            packed += li * m;
        }
        StateIndex(packed)
    }

    /// Unpack a state index into per-species level indices.
    ///
    /// # Panics
    /// Panics if `state` did not come from this space.
    pub fn decode(&self, state: StateIndex) -> Vec<usize> {
        assert!(state.0 < self.states.len());
        let mut rest = state.0;
        let mut indices = vec![0usize; self.axes.len()];
        for i in (0..self.axes.len()).rev() {
            indices[i] = rest / self.multipliers[i];
            rest %= self.multipliers[i];
        }
        indices
    }

    /// The discretized amount of every species at `state`.
    ///
    /// # Panics
    /// Panics if `state` did not come from this space.
    pub fn level_values(&self, state: StateIndex) -> Vec<f64> {
        self.decode(state)
            .iter()
            .zip(&self.axes)
            .map(|(&li, axis)| axis.value(li))
            .collect()
    }
}

/// Rate of one reaction at the given substituted amounts, with the
/// under-stock short-circuit and the non-finite/negative clamp.
fn clamped_rate(
    network: &ReactionNetwork,
    evaluator: &dyn RateEvaluator,
    reaction: ReactionId,
    amounts: &[f64],
    stats: &mut BuildStats,
) -> f64 {
    let def = &network.reactions()[reaction.index()];
    for link in &def.reactants {
        if amounts[link.species.index()] < link.stoichiometry {
            return 0.0;
        }
    }
    stats.law_evaluations += 1;
    let rate = evaluator.rate(reaction, amounts);
    if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        0.0
    }
}

/// Step the index vector to the next state in mixed-radix counting
/// order, updating substituted amounts and marking the dependents of
/// every changed species dirty. Returns false once all states have been
/// visited.
fn advance(
    network: &ReactionNetwork,
    axes: &[CriticalLevels],
    indices: &mut [usize],
    amounts: &mut [f64],
    dirty: &mut [bool],
) -> bool {
    for (i, axis) in axes.iter().enumerate() {
        let species = SpeciesId(i as u32);
        if indices[i] + 1 < axis.len() {
            indices[i] += 1;
            amounts[i] = axis.value(indices[i]);
            for &r in network.dependents(species) {
                dirty[r.index()] = true;
            }
            return true;
        }
        // At the axis maximum: reset to zero and carry into the next
        // axis. An axis of size one never actually changes.
        if indices[i] != 0 {
            indices[i] = 0;
            amounts[i] = axis.value(0);
            for &r in network.dependents(species) {
                dirty[r.index()] = true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use simmer_core::{Reaction, Species};
    use simmer_test_utils::MockEvaluator;

    fn levels(values: &[f64], initial: usize) -> CriticalLevels {
        CriticalLevels::new(values.to_vec(), initial).unwrap()
    }

    /// Species X, degradation only, levels {0, 5, 10}, starting at 10.
    fn degradation_setup() -> (ReactionNetwork, Vec<CriticalLevels>) {
        let net = ReactionNetwork::new(
            vec![Species::new("X", 10.0)],
            vec![Reaction::new("decay", "0.4 * X").reactant(SpeciesId(0), 1.0)],
        )
        .unwrap();
        let axes = vec![levels(&[0.0, 5.0, 10.0], 2)];
        (net, axes)
    }

    #[test]
    fn degradation_chain_has_three_states_two_transitions() {
        let (net, axes) = degradation_setup();
        let eval = simmer_core::ExpressionEvaluator::new(&net).unwrap();
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        assert_eq!(space.state_count(), 3);
        assert_eq!(space.initial_state(), StateIndex(2));
        assert_eq!(space.stats().transitions, 2);

        // At X=10 the outflow is 0.4*10 spread over the gap to X=5.
        let top = space.transitions(StateIndex(2));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].target, StateIndex(1));
        assert!((top[0].rate - 4.0 / 5.0).abs() < 1e-12);

        let mid = space.transitions(StateIndex(1));
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].target, StateIndex(0));
        assert!((mid[0].rate - 2.0 / 5.0).abs() < 1e-12);

        // The floor state is absorbing.
        assert!(space.transitions(StateIndex(0)).is_empty());
    }

    /// Two independent species, each with two levels, each produced and
    /// consumed.
    fn independent_setup() -> (ReactionNetwork, Vec<CriticalLevels>) {
        let species = vec![Species::new("A", 1.0), Species::new("B", 0.0)];
        let reactions = vec![
            Reaction::new("birth_a", "2.0").product(SpeciesId(0), 1.0),
            Reaction::new("decay_a", "1.5").reactant(SpeciesId(0), 1.0),
            Reaction::new("birth_b", "2.0").product(SpeciesId(1), 1.0),
            Reaction::new("decay_b", "1.5").reactant(SpeciesId(1), 1.0),
        ];
        let net = ReactionNetwork::new(species, reactions).unwrap();
        let axes = vec![levels(&[0.0, 1.0], 1), levels(&[0.0, 1.0], 0)];
        (net, axes)
    }

    #[test]
    fn two_axes_compose_mixed_radix() {
        let (net, axes) = independent_setup();
        let eval = MockEvaluator::with_default(1.0);
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        assert_eq!(space.state_count(), 4);
        // initial = idxA + idxB * 2
        assert_eq!(space.initial_state(), StateIndex(1));
        for s in 0..4 {
            assert!(space.transitions(StateIndex(s)).len() <= 4);
        }
        assert_eq!(space.encode(&[1, 1]), StateIndex(3));
        assert_eq!(space.decode(StateIndex(2)), vec![0, 1]);
        assert_eq!(space.level_values(StateIndex(3)), vec![1.0, 1.0]);
    }

    #[test]
    fn rate_cache_skips_unaffected_reactions() {
        let (net, axes) = independent_setup();
        let mut eval = MockEvaluator::new();
        eval.set_rate(ReactionId(0), 2.0);
        eval.set_rate(ReactionId(1), 1.5);
        eval.set_rate(ReactionId(2), 2.0);
        eval.set_rate(ReactionId(3), 1.5);
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        // Walking A's axis twice per B level re-evaluates only A's
        // reactions; B's stay cached on states 1 and 3. Under-stocked
        // decay laws are never invoked at all.
        assert_eq!(eval.calls(), 9);
        assert_eq!(space.stats().law_evaluations, 9);
        assert_eq!(space.stats().cache_hits, 4);
    }

    #[test]
    fn understocked_reactions_skip_law_evaluation() {
        let net = ReactionNetwork::new(
            vec![Species::new("X", 0.0)],
            vec![
                Reaction::new("birth", "3.0").product(SpeciesId(0), 1.0),
                Reaction::new("pair_decay", "5.0").reactant(SpeciesId(0), 2.0),
            ],
        )
        .unwrap();
        let mut eval = MockEvaluator::new();
        eval.set_rate(ReactionId(0), 3.0);
        eval.set_rate(ReactionId(1), 5.0);
        let axes = vec![levels(&[0.0, 1.0], 0)];
        let space = StateSpace::build(&net, &eval, axes).unwrap();

        // Both levels are below the pair's stoichiometry of 2, so only
        // the birth law is ever evaluated: once per level of X.
        assert_eq!(eval.calls(), 2);
        assert_eq!(space.transitions(StateIndex(0)).len(), 1);
        assert!(space.transitions(StateIndex(1)).is_empty());
    }

    #[test]
    fn non_finite_rates_are_clamped_to_zero() {
        let net = ReactionNetwork::new(
            vec![Species::new("X", 1.0)],
            vec![Reaction::new("bad", "1 / 0").reactant(SpeciesId(0), 1.0)],
        )
        .unwrap();
        let eval = simmer_core::ExpressionEvaluator::new(&net).unwrap();
        let space = StateSpace::build(&net, &eval, vec![levels(&[0.0, 1.0], 1)]).unwrap();

        // Division by zero yields an infinite rate, which clamps away.
        assert_eq!(space.stats().transitions, 0);
    }

    #[test]
    fn single_level_axis_yields_one_absorbing_state() {
        let net = ReactionNetwork::new(vec![Species::new("X", 7.0)], vec![]).unwrap();
        let eval = MockEvaluator::new();
        let space = StateSpace::build(&net, &eval, vec![levels(&[7.0], 0)]).unwrap();

        assert_eq!(space.state_count(), 1);
        assert_eq!(space.initial_state(), StateIndex(0));
        assert!(space.transitions(StateIndex(0)).is_empty());
    }

    #[test]
    fn axis_count_mismatch_is_rejected() {
        let net = ReactionNetwork::new(vec![Species::new("X", 1.0)], vec![]).unwrap();
        let eval = MockEvaluator::new();
        let err = StateSpace::build(&net, &eval, vec![]).unwrap_err();
        assert_eq!(err, SpaceError::AxisCount { expected: 1, got: 0 });
    }

    #[test]
    fn arena_allocation_failure_is_reported() {
        let names = ["P", "Q", "R", "S"];
        let species: Vec<Species> = names.iter().map(|n| Species::new(*n, 0.0)).collect();
        let net = ReactionNetwork::new(species, vec![]).unwrap();
        let eval = MockEvaluator::new();
        let axis: Vec<f64> = (0..50_000).map(|i| f64::from(i)).collect();
        let axes: Vec<CriticalLevels> = (0..4)
            .map(|_| CriticalLevels::new(axis.clone(), 0).unwrap())
            .collect();

        let err = StateSpace::build(&net, &eval, axes).unwrap_err();
        assert!(matches!(err, SpaceError::OutOfMemory { .. }));
    }

    proptest! {
        #[test]
        fn mixed_radix_roundtrips_every_state(
            shapes in proptest::collection::vec(1usize..=4, 1..=4)
        ) {
            let species: Vec<Species> = (0..shapes.len())
                .map(|i| Species::new(format!("S{i}"), 0.0))
                .collect();
            let net = ReactionNetwork::new(species, vec![]).unwrap();
            let eval = MockEvaluator::new();
            let axes: Vec<CriticalLevels> = shapes
                .iter()
                .map(|&k| {
                    CriticalLevels::new((0..k).map(|v| v as f64).collect(), 0).unwrap()
                })
                .collect();
            let space = StateSpace::build(&net, &eval, axes).unwrap();

            prop_assert_eq!(space.state_count(), shapes.iter().product::<usize>());
            for s in 0..space.state_count() {
                let indices = space.decode(StateIndex(s));
                for (li, &k) in indices.iter().zip(&shapes) {
                    prop_assert!(*li < k);
                }
                prop_assert_eq!(space.encode(&indices), StateIndex(s));
            }
        }
    }
}
