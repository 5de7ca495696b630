//! The reaction-network model: species, reactions, and their wiring.
//!
//! A [`ReactionNetwork`] owns its species and reactions in flat vectors;
//! [`SpeciesId`]/[`ReactionId`] are indices into those vectors. The
//! constructor validates all cross-references once, so downstream code
//! (level generation, state-space building, stochastic simulation) can
//! index without re-checking.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{ModelError, ReactionId, SpeciesId};

// ── Species ────────────────────────────────────────────────────────

/// A chemical species and its starting amount.
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    /// Unique name, referenced by kinetic laws and configuration keys.
    pub name: String,
    /// Amount present at time zero. Finite and non-negative.
    pub initial_amount: f64,
}

impl Species {
    /// Create a species with the given name and initial amount.
    pub fn new(name: impl Into<String>, initial_amount: f64) -> Self {
        Self {
            name: name.into(),
            initial_amount,
        }
    }
}

// ── Reactions ──────────────────────────────────────────────────────

/// One side entry of a reaction: a species and its stoichiometric
/// coefficient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesLink {
    /// The linked species.
    pub species: SpeciesId,
    /// Units consumed or produced per firing. Finite and positive.
    pub stoichiometry: f64,
}

impl SpeciesLink {
    /// Create a link with the given coefficient.
    pub fn new(species: SpeciesId, stoichiometry: f64) -> Self {
        Self {
            species,
            stoichiometry,
        }
    }
}

/// Side list of a reaction. Inline capacity 2 — nearly all reactions
/// have at most two reactants or products.
pub type LinkList = SmallVec<[SpeciesLink; 2]>;

/// A reaction: reactant and product links, optional modifiers, and a
/// kinetic-law expression written over species names.
///
/// The law string is parsed by
/// [`ExpressionEvaluator`](crate::ExpressionEvaluator); this struct only
/// carries it. Modifiers participate in the law (and in dependency
/// tracking) without being consumed or produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    /// Name used in diagnostics and reports.
    pub name: String,
    /// Species consumed per firing.
    pub reactants: LinkList,
    /// Species produced per firing.
    pub products: LinkList,
    /// Species read by the law but left untouched by firings.
    pub modifiers: SmallVec<[SpeciesId; 2]>,
    /// Whether the law describes a net two-way rate. The stochastic
    /// engine rejects reversible reactions; split them upstream.
    pub reversible: bool,
    /// Kinetic-law expression, e.g. `"0.3 * E * S / (0.7 + S)"`.
    pub law: String,
}

impl Reaction {
    /// Create an irreversible reaction with empty side lists.
    pub fn new(name: impl Into<String>, law: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reactants: SmallVec::new(),
            products: SmallVec::new(),
            modifiers: SmallVec::new(),
            reversible: false,
            law: law.into(),
        }
    }

    /// Add a reactant link.
    #[must_use]
    pub fn reactant(mut self, species: SpeciesId, stoichiometry: f64) -> Self {
        self.reactants.push(SpeciesLink::new(species, stoichiometry));
        self
    }

    /// Add a product link.
    #[must_use]
    pub fn product(mut self, species: SpeciesId, stoichiometry: f64) -> Self {
        self.products.push(SpeciesLink::new(species, stoichiometry));
        self
    }

    /// Add a modifier.
    #[must_use]
    pub fn modifier(mut self, species: SpeciesId) -> Self {
        self.modifiers.push(species);
        self
    }

    /// Mark the reaction as reversible.
    #[must_use]
    pub fn reversible(mut self) -> Self {
        self.reversible = true;
        self
    }

    /// Every species this reaction touches, in any role, deduplicated.
    fn touched_species(&self) -> SmallVec<[SpeciesId; 4]> {
        let mut touched: SmallVec<[SpeciesId; 4]> = self
            .reactants
            .iter()
            .chain(self.products.iter())
            .map(|link| link.species)
            .collect();
        touched.extend(self.modifiers.iter().copied());
        touched.sort_unstable();
        touched.dedup();
        touched
    }
}

// ── ReactionNetwork ────────────────────────────────────────────────

/// A validated reaction network.
///
/// Construction checks every cross-reference and precomputes the
/// species-to-dependent-reactions map used for propensity-cache
/// invalidation, so lookups during analysis are plain indexing.
#[derive(Clone, Debug)]
pub struct ReactionNetwork {
    species: Vec<Species>,
    reactions: Vec<Reaction>,
    names: IndexMap<String, SpeciesId>,
    /// For each species, the reactions that touch it in any role.
    dependents: Vec<Vec<ReactionId>>,
    produced: Vec<bool>,
    consumed: Vec<bool>,
}

impl ReactionNetwork {
    /// Validate and assemble a network.
    ///
    /// Checks, in order: the species list is non-empty; names are
    /// non-empty and unique; initial amounts are finite and
    /// non-negative; reaction names are non-empty; all links and
    /// modifiers reference existing species; stoichiometries are finite
    /// and positive.
    pub fn new(species: Vec<Species>, reactions: Vec<Reaction>) -> Result<Self, ModelError> {
        // 1. Non-empty species list, counts representable as IDs.
        if species.is_empty() {
            return Err(ModelError::NoSpecies);
        }
        if species.len() > u32::MAX as usize {
            return Err(ModelError::CountOverflow {
                what: "species",
                value: species.len(),
            });
        }
        if reactions.len() > u32::MAX as usize {
            return Err(ModelError::CountOverflow {
                what: "reaction",
                value: reactions.len(),
            });
        }

        // 2. Species names non-empty and unique; amounts sane.
        let mut names = IndexMap::with_capacity(species.len());
        for (i, sp) in species.iter().enumerate() {
            if sp.name.is_empty() {
                return Err(ModelError::EmptySpeciesName { index: i });
            }
            if !sp.initial_amount.is_finite() || sp.initial_amount < 0.0 {
                return Err(ModelError::InvalidInitialAmount {
                    species: sp.name.clone(),
                    value: sp.initial_amount,
                });
            }
            if names.insert(sp.name.clone(), SpeciesId(i as u32)).is_some() {
                return Err(ModelError::DuplicateSpeciesName {
                    name: sp.name.clone(),
                });
            }
        }

        // 3. Reaction wiring.
        for (i, reaction) in reactions.iter().enumerate() {
            if reaction.name.is_empty() {
                return Err(ModelError::EmptyReactionName { index: i });
            }
            for link in reaction.reactants.iter().chain(reaction.products.iter()) {
                if link.species.index() >= species.len() {
                    return Err(ModelError::SpeciesOutOfRange {
                        reaction: reaction.name.clone(),
                        species: link.species,
                    });
                }
                if !link.stoichiometry.is_finite() || link.stoichiometry <= 0.0 {
                    return Err(ModelError::InvalidStoichiometry {
                        reaction: reaction.name.clone(),
                        species: link.species,
                        value: link.stoichiometry,
                    });
                }
            }
            for &m in &reaction.modifiers {
                if m.index() >= species.len() {
                    return Err(ModelError::SpeciesOutOfRange {
                        reaction: reaction.name.clone(),
                        species: m,
                    });
                }
            }
        }

        // 4. Dependency map and role flags.
        let mut dependents = vec![Vec::new(); species.len()];
        let mut produced = vec![false; species.len()];
        let mut consumed = vec![false; species.len()];
        for (i, reaction) in reactions.iter().enumerate() {
            let rid = ReactionId(i as u32);
            for s in reaction.touched_species() {
                dependents[s.index()].push(rid);
            }
            for link in &reaction.reactants {
                consumed[link.species.index()] = true;
            }
            for link in &reaction.products {
                produced[link.species.index()] = true;
            }
        }

        Ok(Self {
            species,
            reactions,
            names,
            dependents,
            produced,
            consumed,
        })
    }

    /// All species, in registration order.
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// All reactions, in registration order.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Number of species.
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Number of reactions.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Look up a species by name.
    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.names.get(name).copied()
    }

    /// Name of a species.
    ///
    /// # Panics
    /// Panics if `id` did not come from this network.
    pub fn species_name(&self, id: SpeciesId) -> &str {
        &self.species[id.index()].name
    }

    /// Reactions that touch `id` as reactant, product, or modifier.
    ///
    /// This is the invalidation set for propensity caches: when the
    /// amount of `id` changes, exactly these reactions need their rates
    /// recomputed.
    ///
    /// # Panics
    /// Panics if `id` did not come from this network.
    pub fn dependents(&self, id: SpeciesId) -> &[ReactionId] {
        &self.dependents[id.index()]
    }

    /// Whether any reaction produces `id`.
    ///
    /// Reversibility does not widen the role: a reversible reaction's
    /// net law is clamped at zero downstream, so its reverse direction
    /// never materializes as flow.
    ///
    /// # Panics
    /// Panics if `id` did not come from this network.
    pub fn is_produced(&self, id: SpeciesId) -> bool {
        self.produced[id.index()]
    }

    /// Whether any reaction consumes `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this network.
    pub fn is_consumed(&self, id: SpeciesId) -> bool {
        self.consumed[id.index()]
    }

    /// Per-species initial amounts, indexed by [`SpeciesId`].
    pub fn initial_amounts(&self) -> Vec<f64> {
        self.species.iter().map(|s| s.initial_amount).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_species() -> Vec<Species> {
        vec![Species::new("A", 10.0), Species::new("B", 0.0)]
    }

    #[test]
    fn builds_and_resolves_names() {
        let net = ReactionNetwork::new(
            two_species(),
            vec![Reaction::new("decay", "0.1 * A")
                .reactant(SpeciesId(0), 1.0)
                .product(SpeciesId(1), 1.0)],
        )
        .unwrap();

        assert_eq!(net.species_count(), 2);
        assert_eq!(net.species_id("A"), Some(SpeciesId(0)));
        assert_eq!(net.species_id("B"), Some(SpeciesId(1)));
        assert_eq!(net.species_id("C"), None);
        assert_eq!(net.species_name(SpeciesId(1)), "B");
        assert_eq!(net.initial_amounts(), vec![10.0, 0.0]);
    }

    #[test]
    fn role_flags_follow_link_sides() {
        let net = ReactionNetwork::new(
            two_species(),
            vec![Reaction::new("decay", "0.1 * A")
                .reactant(SpeciesId(0), 1.0)
                .product(SpeciesId(1), 1.0)],
        )
        .unwrap();

        assert!(net.is_consumed(SpeciesId(0)));
        assert!(!net.is_produced(SpeciesId(0)));
        assert!(net.is_produced(SpeciesId(1)));
        assert!(!net.is_consumed(SpeciesId(1)));
    }

    #[test]
    fn dependents_cover_all_roles_once() {
        let species = vec![
            Species::new("S", 5.0),
            Species::new("E", 1.0),
            Species::new("P", 0.0),
        ];
        // E appears as a modifier only; S on both sides of r1.
        let r0 = Reaction::new("convert", "0.3 * E * S")
            .reactant(SpeciesId(0), 1.0)
            .product(SpeciesId(2), 1.0)
            .modifier(SpeciesId(1));
        let r1 = Reaction::new("cycle", "0.1 * S")
            .reactant(SpeciesId(0), 1.0)
            .product(SpeciesId(0), 2.0);
        let net = ReactionNetwork::new(species, vec![r0, r1]).unwrap();

        assert_eq!(net.dependents(SpeciesId(0)), &[ReactionId(0), ReactionId(1)]);
        assert_eq!(net.dependents(SpeciesId(1)), &[ReactionId(0)]);
        assert_eq!(net.dependents(SpeciesId(2)), &[ReactionId(0)]);
    }

    #[test]
    fn rejects_empty_species_list() {
        let err = ReactionNetwork::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, ModelError::NoSpecies);
    }

    #[test]
    fn rejects_duplicate_species_name() {
        let err = ReactionNetwork::new(
            vec![Species::new("A", 1.0), Species::new("A", 2.0)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateSpeciesName { name: "A".into() }
        );
    }

    #[test]
    fn rejects_negative_initial_amount() {
        let err =
            ReactionNetwork::new(vec![Species::new("A", -1.0)], vec![]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidInitialAmount { .. }));
    }

    #[test]
    fn rejects_dangling_species_reference() {
        let err = ReactionNetwork::new(
            two_species(),
            vec![Reaction::new("bad", "1.0").reactant(SpeciesId(7), 1.0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::SpeciesOutOfRange {
                reaction: "bad".into(),
                species: SpeciesId(7),
            }
        );
    }

    #[test]
    fn rejects_zero_stoichiometry() {
        let err = ReactionNetwork::new(
            two_species(),
            vec![Reaction::new("bad", "1.0").reactant(SpeciesId(0), 0.0)],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidStoichiometry { .. }));
    }

    #[test]
    fn rejects_dangling_modifier() {
        let err = ReactionNetwork::new(
            two_species(),
            vec![Reaction::new("bad", "1.0").modifier(SpeciesId(3))],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::SpeciesOutOfRange { .. }));
    }
}
